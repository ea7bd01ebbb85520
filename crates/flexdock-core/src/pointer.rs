#![forbid(unsafe_code)]

//! Pointer input as delivered by the host's gesture capture.

use serde::{Deserialize, Serialize};

/// A pointer position in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when either axis moved strictly more than `threshold` pixels.
    #[inline]
    pub fn moved_beyond(&self, other: PointerPosition, threshold: i32) -> bool {
        (self.x - other.x).abs() > threshold || (self.y - other.y).abs() > threshold
    }

    /// True when both axes are within `tolerance` pixels.
    #[inline]
    pub fn is_near(&self, other: PointerPosition, tolerance: i32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<(i32, i32)> for PointerPosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Which button started the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}
