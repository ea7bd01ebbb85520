#![forbid(unsafe_code)]

//! Core: geometry and pointer input primitives shared by the docking engine
//! and the hosts that render it.

pub mod geometry;
pub mod pointer;

pub use geometry::{Insets, Orientation, Rect};
pub use pointer::{PointerButton, PointerPosition};
