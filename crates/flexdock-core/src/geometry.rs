#![forbid(unsafe_code)]

//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// Axis along which a row lays out its children.
///
/// A horizontal row places children left-to-right; a vertical row places
/// them top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horz,
    Vert,
}

impl Orientation {
    /// The perpendicular orientation.
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Horz => Self::Vert,
            Self::Vert => Self::Horz,
        }
    }
}

/// An axis-aligned rectangle in layout pixels.
///
/// Origin is the top-left corner of the layout surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The zero rectangle.
    #[inline]
    pub const fn empty() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Horizontal midpoint, rounded toward the left edge.
    #[inline]
    pub const fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Vertical midpoint, rounded toward the top edge.
    #[inline]
    pub const fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    ///
    /// Left/top edges are inclusive, right/bottom edges exclusive, so two
    /// rectangles sharing an edge never both contain a point on it.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether this rectangle lies entirely inside `outer`.
    #[inline]
    pub const fn is_within(&self, outer: &Rect) -> bool {
        self.x >= outer.x
            && self.y >= outer.y
            && self.right() <= outer.right()
            && self.bottom() <= outer.bottom()
    }

    /// Check whether two rectangles overlap with non-zero area.
    #[inline]
    pub const fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Shrink the rectangle by the given insets.
    ///
    /// Width and height never go negative.
    pub fn remove_insets(&self, insets: Insets) -> Rect {
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.left - insets.right).max(0),
            height: (self.height - insets.top - insets.bottom).max(0),
        }
    }

    /// Extent along the given orientation (width for horizontal, height for
    /// vertical).
    #[inline]
    pub const fn size(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horz => self.width,
            Orientation::Vert => self.height,
        }
    }
}

/// Edge insets for margins and borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Insets {
    /// Zero insets.
    pub const ZERO: Self = Self::all(0);

    /// Create insets with equal values.
    pub const fn all(val: i32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create insets with specific values.
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> i32 {
        self.top + self.bottom
    }
}

impl From<i32> for Insets {
    fn from(val: i32) -> Self {
        Self::all(val)
    }
}

impl From<(i32, i32, i32, i32)> for Insets {
    fn from((top, right, bottom, left): (i32, i32, i32, i32)) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Insets, Orientation, Rect};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
    }

    #[test]
    fn rect_contains_empty_rect() {
        let r = Rect::new(5, 5, 0, 0);
        assert!(!r.contains(5, 5));
    }

    #[test]
    fn adjacent_rects_do_not_share_points() {
        let left = Rect::new(0, 0, 10, 10);
        let right = Rect::new(10, 0, 10, 10);
        assert!(!left.contains(10, 5));
        assert!(right.contains(10, 5));
        assert!(!left.intersects(&right));
    }

    #[test]
    fn remove_insets_reduces() {
        let rect = Rect::new(0, 0, 10, 10);
        let inner = rect.remove_insets(Insets::new(1, 2, 3, 4));
        assert_eq!(inner, Rect::new(4, 1, 4, 6));
    }

    #[test]
    fn remove_insets_never_negative() {
        let r = Rect::new(0, 0, 10, 10);
        let inner = r.remove_insets(Insets::all(20));
        assert_eq!(inner.width, 0);
        assert_eq!(inner.height, 0);
    }

    #[test]
    fn remove_zero_insets_is_identity() {
        let r = Rect::new(5, 10, 20, 30);
        assert_eq!(r.remove_insets(Insets::ZERO), r);
    }

    #[test]
    fn size_follows_orientation() {
        let r = Rect::new(0, 0, 30, 40);
        assert_eq!(r.size(Orientation::Horz), 30);
        assert_eq!(r.size(Orientation::Vert), 40);
        assert_eq!(Orientation::Horz.flip(), Orientation::Vert);
        assert_eq!(Orientation::Vert.flip(), Orientation::Horz);
    }

    #[test]
    fn centers_and_edges() {
        let r = Rect::new(10, 20, 30, 41);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 61);
        assert_eq!(r.center_x(), 25);
        assert_eq!(r.center_y(), 40);
    }

    #[test]
    fn is_within_checks_all_edges() {
        let outer = Rect::new(0, 0, 100, 100);
        assert!(Rect::new(10, 10, 90, 90).is_within(&outer));
        assert!(!Rect::new(10, 10, 91, 90).is_within(&outer));
        assert!(!Rect::new(-1, 0, 10, 10).is_within(&outer));
    }

    #[test]
    fn insets_conversions_and_sums() {
        assert_eq!(Insets::from(3), Insets::all(3));
        let insets = Insets::from((1, 2, 3, 4));
        assert_eq!(insets, Insets::new(1, 2, 3, 4));
        assert_eq!(insets.horizontal_sum(), 6);
        assert_eq!(insets.vertical_sum(), 4);
        assert_eq!(Insets::default(), Insets::ZERO);
    }
}
