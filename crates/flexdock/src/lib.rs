#![forbid(unsafe_code)]

//! flexdock public facade crate.
//!
//! Re-exports the stable surface of the docking engine and adds helpers
//! for reading and writing saved layouts. Most hosts only need the
//! [`prelude`].

use std::fmt;
use std::path::Path;

// --- Core re-exports -------------------------------------------------------

pub use flexdock_core::geometry::{Insets, Orientation, Rect};
pub use flexdock_core::pointer::{PointerButton, PointerPosition};

// --- Engine re-exports -----------------------------------------------------

pub use flexdock_layout::{
    Action, ActionKind, ActionOutcome, Attribute, AttributeDefinitions, AttributeTarget,
    BorderNode, DockLocation, DragEffect, DragHandler, DragItem, DragNoopReason, DragPhase,
    DragSession, DragSessionConfig, DragTransition, DropInfo, EventPayload, IgnoreReason, Model,
    ModelConfig, ModelError, Node, NodeDragController, NodeEvent, NodeId, NodeKind, NodeType,
    Outline, OutlineKind, PointerCapture, RowNode, SharedModel, SplitterDragController,
    SplitterNode, TabNode, TabSetNode,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for flexdock hosts.
#[derive(Debug)]
pub enum Error {
    /// I/O failure reading or writing a saved layout.
    Io(std::io::Error),
    /// The saved layout could not be turned into a model.
    Model(ModelError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Model(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Model(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        Self::Model(err)
    }
}

/// Standard result type for flexdock APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Saved layouts ---------------------------------------------------------

/// Load a model from a saved layout file.
pub fn load_layout(path: impl AsRef<Path>) -> Result<Model> {
    let text = std::fs::read_to_string(path)?;
    Ok(Model::from_json_str(&text)?)
}

/// Write the model's persisted form to `path` as pretty-printed JSON.
pub fn save_layout(model: &Model, path: impl AsRef<Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(&model.to_json())
        .map_err(|e| Error::Io(std::io::Error::other(e)))?;
    std::fs::write(path, text)?;
    Ok(())
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Action, ActionOutcome, DockLocation, DragItem, DragSession, Error, Model, Node, NodeId,
        NodeType, PointerPosition, Rect, Result,
    };

    pub use crate::{core, layout};
}

pub use flexdock_core as core;
pub use flexdock_layout as layout;
