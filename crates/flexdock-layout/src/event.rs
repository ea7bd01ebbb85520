#![forbid(unsafe_code)]

//! Per-node notifications for the rendering layer.
//!
//! Listeners are owned by the [`Model`] and keyed by `(node, event)`; a new
//! registration replaces the previous one. They run synchronously inside the
//! mutation or layout pass that caused them and must not call back into the
//! model.

use flexdock_core::geometry::Rect;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::model::Model;
use crate::node::NodeId;

/// Event names a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeEvent {
    /// A tab became shown or hidden.
    Visibility,
    /// A tab's content rectangle changed.
    Resize,
    /// A tabset entered or left the maximized state.
    Maximize,
    /// A tab was deleted.
    Close,
}

/// Event payload delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventPayload {
    Visibility { visible: bool },
    Resize { rect: Rect },
    Maximize { maximized: bool },
    Close,
}

impl EventPayload {
    #[must_use]
    pub const fn event(&self) -> NodeEvent {
        match self {
            Self::Visibility { .. } => NodeEvent::Visibility,
            Self::Resize { .. } => NodeEvent::Resize,
            Self::Maximize { .. } => NodeEvent::Maximize,
            Self::Close => NodeEvent::Close,
        }
    }
}

pub(crate) type EventListener = Box<dyn FnMut(&EventPayload)>;
pub(crate) type ChangeListener = Box<dyn FnMut(&Action)>;

impl Model {
    /// Register `listener` for `event` on node `id`, replacing any earlier
    /// registration for the same pair.
    pub fn set_event_listener(
        &mut self,
        id: impl Into<NodeId>,
        event: NodeEvent,
        listener: impl FnMut(&EventPayload) + 'static,
    ) {
        self.listeners.insert((id.into(), event), Box::new(listener));
    }

    /// Returns whether a listener was registered.
    pub fn remove_event_listener(&mut self, id: &str, event: NodeEvent) -> bool {
        self.listeners.remove(&(NodeId::from(id), event)).is_some()
    }

    /// Called after every applied action, once layout has been refreshed.
    pub fn set_change_listener(&mut self, listener: impl FnMut(&Action) + 'static) {
        self.change_listener = Some(Box::new(listener));
    }

    pub fn clear_change_listener(&mut self) {
        self.change_listener = None;
    }

    pub(crate) fn emit(&mut self, id: &NodeId, payload: EventPayload) {
        if let Some(listener) = self.listeners.get_mut(&(id.clone(), payload.event())) {
            listener(&payload);
        }
    }

    /// Fire `close` for a tab and drop every listener it owns.
    pub(crate) fn close_listeners(&mut self, id: &NodeId) {
        self.emit(id, EventPayload::Close);
        self.listeners.retain(|(owner, _), _| owner != id);
    }
}
