#![forbid(unsafe_code)]

//! Docking-layout engine.
//!
//! A [`Model`] owns a tree of rows, tabsets and tabs plus up to four edge
//! borders, and turns it into pixel rectangles for a renderer:
//!
//! - [`node`] - the node arena and per-type attributes
//! - [`layout`] - the layout pass (weights, preferred sizes, borders)
//! - [`action`] - every mutation as a serializable [`Action`]
//! - [`drop_target`] - where a dragged item would land
//! - [`drag`] - pointer session recognizing clicks and drags
//! - [`controller`] - drag handlers that dispatch actions
//!
//! # Example
//!
//! ```
//! use flexdock_core::geometry::Rect;
//! use flexdock_layout::{Action, Model};
//! use serde_json::json;
//!
//! let mut model = Model::from_json(&json!({
//!     "layout": {"type": "row", "children": [
//!         {"type": "tabset", "id": "main", "children": [{"type": "tab", "id": "a"}]}
//!     ]}
//! }))
//! .unwrap();
//! model.layout(Rect::new(0, 0, 800, 600));
//! model.dispatch(Action::rename_tab("a", "Editor"));
//! assert_eq!(model.node("a").unwrap().name(), Some("Editor"));
//! ```

pub mod action;
pub mod attribute;
pub mod config;
pub mod controller;
mod dock;
pub mod dock_location;
pub mod drag;
pub mod drop_target;
pub mod error;
pub mod event;
mod json;
pub mod layout;
mod logging;
pub mod model;
pub mod node;

pub use action::{Action, ActionKind, ActionOutcome, IgnoreReason};
pub use attribute::{Attribute, AttributeDefinitions, AttributeTarget};
pub use config::ModelConfig;
pub use controller::{NodeDragController, Outline, SharedModel, SplitterDragController};
pub use dock_location::DockLocation;
pub use drag::{
    DragEffect, DragHandler, DragNoopReason, DragPhase, DragSession, DragSessionConfig,
    DragTransition, PointerCapture,
};
pub use drop_target::{DragItem, DropInfo, OutlineKind};
pub use error::ModelError;
pub use event::{EventPayload, NodeEvent};
pub use flexdock_core::geometry::{Insets, Orientation, Rect};
pub use flexdock_core::pointer::{PointerButton, PointerPosition};
pub use layout::{distribute_weighted, largest_remainder};
pub use model::Model;
pub use node::{BorderNode, Node, NodeId, NodeKind, NodeType, RowNode, SplitterNode, TabNode, TabSetNode};
