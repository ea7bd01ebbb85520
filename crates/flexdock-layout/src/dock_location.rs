#![forbid(unsafe_code)]

//! Dock locations and the rectangle arithmetic attached to them.

use std::fmt;

use flexdock_core::geometry::{Orientation, Rect};
use serde::{Deserialize, Serialize};

/// Where a dragged node lands relative to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockLocation {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl DockLocation {
    /// All locations in persisted order.
    pub const ALL: [Self; 5] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::Center,
    ];

    /// Axis along which a drop at this location divides its target.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Horz,
            Self::Top | Self::Bottom | Self::Center => Orientation::Vert,
        }
    }

    /// Offset added to the target's index when inserting a sibling.
    #[must_use]
    pub const fn index_offset(self) -> usize {
        match self {
            Self::Bottom | Self::Right => 1,
            Self::Top | Self::Left | Self::Center => 0,
        }
    }

    /// Quadrant rule: the outer quarter of the width picks left/right first,
    /// then the outer quarter of the height picks top/bottom, else center.
    #[must_use]
    pub fn from_point(rect: Rect, x: i32, y: i32) -> Self {
        let fx = f64::from(x - rect.x) / f64::from(rect.width);
        let fy = f64::from(y - rect.y) / f64::from(rect.height);
        if fx < 0.25 {
            Self::Left
        } else if fx > 0.75 {
            Self::Right
        } else if fy < 0.25 {
            Self::Top
        } else if fy > 0.75 {
            Self::Bottom
        } else {
            Self::Center
        }
    }

    /// Half of `rect` on this side; the whole rect for center.
    #[must_use]
    pub fn dock_rect(self, rect: Rect) -> Rect {
        match self {
            Self::Top => Rect::new(rect.x, rect.y, rect.width, rect.height / 2),
            Self::Bottom => {
                let h = rect.height / 2;
                Rect::new(rect.x, rect.bottom() - h, rect.width, h)
            }
            Self::Left => Rect::new(rect.x, rect.y, rect.width / 2, rect.height),
            Self::Right => {
                let w = rect.width / 2;
                Rect::new(rect.right() - w, rect.y, w, rect.height)
            }
            Self::Center => rect,
        }
    }

    /// Carve `size` pixels off this edge of `rect`.
    ///
    /// Returns `(carved, remainder)`. Center carves from the bottom like
    /// [`DockLocation::Bottom`].
    #[must_use]
    pub fn split(self, rect: Rect, size: i32) -> (Rect, Rect) {
        match self {
            Self::Top => (
                Rect::new(rect.x, rect.y, rect.width, size),
                Rect::new(rect.x, rect.y + size, rect.width, rect.height - size),
            ),
            Self::Left => (
                Rect::new(rect.x, rect.y, size, rect.height),
                Rect::new(rect.x + size, rect.y, rect.width - size, rect.height),
            ),
            Self::Right => (
                Rect::new(rect.right() - size, rect.y, size, rect.height),
                Rect::new(rect.x, rect.y, rect.width - size, rect.height),
            ),
            Self::Bottom | Self::Center => (
                Rect::new(rect.x, rect.bottom() - size, rect.width, size),
                Rect::new(rect.x, rect.y, rect.width, rect.height - size),
            ),
        }
    }

    /// Opposite edge. Center reflects to top.
    #[must_use]
    pub const fn reflect(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Center => Self::Top,
        }
    }

    /// Persisted lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|loc| loc.name() == name)
    }
}

impl fmt::Display for DockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
