#![forbid(unsafe_code)]

//! The action protocol: every model mutation is a named [`Action`] applied
//! through [`Model::dispatch`].
//!
//! An action either applies completely or is ignored. Every id is resolved
//! and every precondition checked before the tree is touched; stale ids are
//! an expected race with the UI, not an error.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attribute::AttributeDefinitions;
use crate::dock_location::DockLocation;
use crate::event::EventPayload;
use crate::layout::{axis_end, axis_start};
use crate::logging::{debug, debug_span};
use crate::model::Model;
use crate::node::{Node, NodeId, NodeKind, NodeType};

/// A mutation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Insert a tab or tabset described by `json` at `to_node`.
    AddNode {
        json: Value,
        to_node: NodeId,
        location: DockLocation,
        index: Option<usize>,
    },
    /// Re-parent an existing tab or tabset.
    MoveNode {
        from_node: NodeId,
        to_node: NodeId,
        location: DockLocation,
        index: Option<usize>,
    },
    DeleteTab {
        node: NodeId,
    },
    /// Remove a tabset with all its tabs.
    DeleteTabset {
        node: NodeId,
    },
    RenameTab {
        node: NodeId,
        text: String,
    },
    SelectTab {
        tab_node: NodeId,
    },
    SetActiveTabset {
        tabset_node: NodeId,
    },
    /// Redistribute weight between two adjacent row children after a
    /// splitter drag.
    AdjustSplit {
        node1: NodeId,
        weight1: f64,
        pixel_width1: i32,
        node2: NodeId,
        weight2: f64,
        pixel_width2: i32,
    },
    /// Resize an open border panel.
    AdjustBorderSplit {
        node: NodeId,
        size: i32,
    },
    MaximizeToggle {
        node: NodeId,
    },
    UpdateModelAttributes {
        json: Map<String, Value>,
    },
    UpdateNodeAttributes {
        node: NodeId,
        json: Map<String, Value>,
    },
}

impl Action {
    pub fn add_node(
        json: Value,
        to_node: impl Into<NodeId>,
        location: DockLocation,
        index: Option<usize>,
    ) -> Self {
        Self::AddNode {
            json,
            to_node: to_node.into(),
            location,
            index,
        }
    }

    pub fn move_node(
        from_node: impl Into<NodeId>,
        to_node: impl Into<NodeId>,
        location: DockLocation,
        index: Option<usize>,
    ) -> Self {
        Self::MoveNode {
            from_node: from_node.into(),
            to_node: to_node.into(),
            location,
            index,
        }
    }

    pub fn delete_tab(node: impl Into<NodeId>) -> Self {
        Self::DeleteTab { node: node.into() }
    }

    pub fn delete_tabset(node: impl Into<NodeId>) -> Self {
        Self::DeleteTabset { node: node.into() }
    }

    pub fn rename_tab(node: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self::RenameTab {
            node: node.into(),
            text: text.into(),
        }
    }

    pub fn select_tab(tab_node: impl Into<NodeId>) -> Self {
        Self::SelectTab {
            tab_node: tab_node.into(),
        }
    }

    pub fn set_active_tabset(tabset_node: impl Into<NodeId>) -> Self {
        Self::SetActiveTabset {
            tabset_node: tabset_node.into(),
        }
    }

    pub fn adjust_border_split(node: impl Into<NodeId>, size: i32) -> Self {
        Self::AdjustBorderSplit {
            node: node.into(),
            size,
        }
    }

    pub fn maximize_toggle(node: impl Into<NodeId>) -> Self {
        Self::MaximizeToggle { node: node.into() }
    }

    #[must_use]
    pub fn update_model_attributes(json: Map<String, Value>) -> Self {
        Self::UpdateModelAttributes { json }
    }

    pub fn update_node_attributes(node: impl Into<NodeId>, json: Map<String, Value>) -> Self {
        Self::UpdateNodeAttributes {
            node: node.into(),
            json,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::AddNode { .. } => ActionKind::AddNode,
            Self::MoveNode { .. } => ActionKind::MoveNode,
            Self::DeleteTab { .. } => ActionKind::DeleteTab,
            Self::DeleteTabset { .. } => ActionKind::DeleteTabset,
            Self::RenameTab { .. } => ActionKind::RenameTab,
            Self::SelectTab { .. } => ActionKind::SelectTab,
            Self::SetActiveTabset { .. } => ActionKind::SetActiveTabset,
            Self::AdjustSplit { .. } => ActionKind::AdjustSplit,
            Self::AdjustBorderSplit { .. } => ActionKind::AdjustBorderSplit,
            Self::MaximizeToggle { .. } => ActionKind::MaximizeToggle,
            Self::UpdateModelAttributes { .. } => ActionKind::UpdateModelAttributes,
            Self::UpdateNodeAttributes { .. } => ActionKind::UpdateNodeAttributes,
        }
    }
}

/// Action discriminant, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    AddNode,
    MoveNode,
    DeleteTab,
    DeleteTabset,
    RenameTab,
    SelectTab,
    SetActiveTabset,
    AdjustSplit,
    AdjustBorderSplit,
    MaximizeToggle,
    UpdateModelAttributes,
    UpdateNodeAttributes,
}

impl ActionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddNode => "add_node",
            Self::MoveNode => "move_node",
            Self::DeleteTab => "delete_tab",
            Self::DeleteTabset => "delete_tabset",
            Self::RenameTab => "rename_tab",
            Self::SelectTab => "select_tab",
            Self::SetActiveTabset => "set_active_tabset",
            Self::AdjustSplit => "adjust_split",
            Self::AdjustBorderSplit => "adjust_border_split",
            Self::MaximizeToggle => "maximize_toggle",
            Self::UpdateModelAttributes => "update_model_attributes",
            Self::UpdateNodeAttributes => "update_node_attributes",
        }
    }
}

/// Result of dispatching an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Ignored(IgnoreReason),
    /// An interceptor took the action; the model was not touched.
    Intercepted,
}

impl ActionOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Why an action was a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    MissingNode { id: NodeId },
    UnexpectedNodeType { id: NodeId, found: NodeType },
    NotDraggable { id: NodeId },
    SelfDrop,
    MaximizeDisabled { id: NodeId },
    NotSiblings,
    UnsupportedLocation { location: DockLocation },
    InvalidNodeJson { message: String },
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode { id } => write!(f, "no node `{id}`"),
            Self::UnexpectedNodeType { id, found } => {
                write!(f, "node `{id}` is a {found}, which this action does not accept")
            }
            Self::NotDraggable { id } => write!(f, "node `{id}` cannot be dragged"),
            Self::SelfDrop => write!(f, "node dropped onto itself"),
            Self::MaximizeDisabled { id } => write!(f, "tabset `{id}` cannot be maximized"),
            Self::NotSiblings => write!(f, "split nodes do not share a row"),
            Self::UnsupportedLocation { location } => {
                write!(f, "target does not accept drops at `{location}`")
            }
            Self::InvalidNodeJson { message } => write!(f, "invalid node json: {message}"),
        }
    }
}

impl Model {
    /// Route `action` to the interceptor if one is installed, otherwise
    /// apply it.
    pub fn dispatch(&mut self, action: Action) -> ActionOutcome {
        if let Some(interceptor) = self.interceptor.as_mut() {
            debug!(kind = action.kind().as_str(), "action intercepted");
            interceptor(action);
            return ActionOutcome::Intercepted;
        }
        self.apply_action(&action)
    }

    /// Take over action handling. The built-in reducer is bypassed entirely
    /// until [`Model::clear_interceptor`].
    pub fn set_interceptor(&mut self, interceptor: impl FnMut(Action) + 'static) {
        self.interceptor = Some(Box::new(interceptor));
    }

    pub fn clear_interceptor(&mut self) {
        self.interceptor = None;
    }

    /// Apply `action` with the built-in reducer, refresh layout and notify
    /// the change listener.
    pub fn apply_action(&mut self, action: &Action) -> ActionOutcome {
        let _span = debug_span!("dispatch_action", kind = action.kind().as_str()).entered();
        match self.reduce(action) {
            Ok(()) => {
                self.relayout();
                if let Some(listener) = self.change_listener.as_mut() {
                    listener(action);
                }
                ActionOutcome::Applied
            }
            Err(reason) => {
                debug!(%reason, "action ignored");
                ActionOutcome::Ignored(reason)
            }
        }
    }

    fn reduce(&mut self, action: &Action) -> Result<(), IgnoreReason> {
        match action {
            Action::AddNode {
                json,
                to_node,
                location,
                index,
            } => self.add_node(json, to_node, *location, *index),
            Action::MoveNode {
                from_node,
                to_node,
                location,
                index,
            } => self.move_node(from_node, to_node, *location, *index),
            Action::DeleteTab { node } => self.delete_tab(node),
            Action::DeleteTabset { node } => self.delete_tabset(node),
            Action::RenameTab { node, text } => {
                self.require(node, &[NodeType::Tab])?;
                if let Some(tab) = self.nodes.get_mut(node).and_then(Node::as_tab_mut) {
                    tab.name.clone_from(text);
                }
                Ok(())
            }
            Action::SelectTab { tab_node } => self.select_tab(tab_node),
            Action::SetActiveTabset { tabset_node } => {
                self.require(tabset_node, &[NodeType::TabSet])?;
                self.active_tabset = Some(tabset_node.clone());
                Ok(())
            }
            Action::AdjustSplit {
                node1,
                weight1,
                pixel_width1,
                node2,
                weight2,
                pixel_width2,
            } => self.adjust_split((node1, *weight1, *pixel_width1), (node2, *weight2, *pixel_width2)),
            Action::AdjustBorderSplit { node, size } => self.adjust_border_split(node, *size),
            Action::MaximizeToggle { node } => self.maximize_toggle(node),
            Action::UpdateModelAttributes { json } => {
                self.config.update(json);
                self.dirty = true;
                Ok(())
            }
            Action::UpdateNodeAttributes { node, json } => self.update_node_attributes(node, json),
        }
    }

    fn require(&self, id: &NodeId, allowed: &[NodeType]) -> Result<NodeType, IgnoreReason> {
        let found = self
            .node_type_of(id)
            .ok_or_else(|| IgnoreReason::MissingNode { id: id.clone() })?;
        if allowed.contains(&found) {
            Ok(found)
        } else {
            Err(IgnoreReason::UnexpectedNodeType {
                id: id.clone(),
                found,
            })
        }
    }

    /// Drop targets: tabsets take any location, borders only center, and
    /// the root row only its edges.
    fn require_target(&self, id: &NodeId, location: DockLocation) -> Result<NodeType, IgnoreReason> {
        let found = self.require(id, &[NodeType::TabSet, NodeType::Border, NodeType::Row])?;
        if found == NodeType::Row && *id != self.root {
            return Err(IgnoreReason::UnexpectedNodeType { id: id.clone(), found });
        }
        let supported = match found {
            NodeType::Border => location == DockLocation::Center,
            NodeType::Row => location != DockLocation::Center,
            _ => true,
        };
        if supported {
            Ok(found)
        } else {
            Err(IgnoreReason::UnsupportedLocation { location })
        }
    }

    fn add_node(
        &mut self,
        json: &Value,
        to_node: &NodeId,
        location: DockLocation,
        index: Option<usize>,
    ) -> Result<(), IgnoreReason> {
        let target = self.require_target(to_node, location)?;
        let id = self.build_node(json).map_err(|e| IgnoreReason::InvalidNodeJson {
            message: e.to_string(),
        })?;
        if target == NodeType::Border && self.node_type_of(&id) != Some(NodeType::Tab) {
            let found = self.node_type_of(&id).unwrap_or(NodeType::TabSet);
            self.discard_subtree(&id);
            return Err(IgnoreReason::UnexpectedNodeType { id, found });
        }
        self.drop_node(&id, to_node, location, index);
        Ok(())
    }

    fn move_node(
        &mut self,
        from_node: &NodeId,
        to_node: &NodeId,
        location: DockLocation,
        index: Option<usize>,
    ) -> Result<(), IgnoreReason> {
        let dragged = self.require(from_node, &[NodeType::Tab, NodeType::TabSet])?;
        let target = self.require_target(to_node, location)?;
        if from_node == to_node {
            return Err(IgnoreReason::SelfDrop);
        }
        if !self.is_drag_enabled(from_node) {
            return Err(IgnoreReason::NotDraggable {
                id: from_node.clone(),
            });
        }
        if target == NodeType::Border && dragged != NodeType::Tab {
            return Err(IgnoreReason::UnexpectedNodeType {
                id: from_node.clone(),
                found: dragged,
            });
        }
        self.drop_node(from_node, to_node, location, index);
        Ok(())
    }

    fn delete_tab(&mut self, node: &NodeId) -> Result<(), IgnoreReason> {
        self.require(node, &[NodeType::Tab])?;
        self.close_listeners(node);
        if let Some((parent, _)) = self.detach(node) {
            self.normalize_selection(&parent);
        }
        self.discard_subtree(node);
        self.tidy();
        Ok(())
    }

    fn delete_tabset(&mut self, node: &NodeId) -> Result<(), IgnoreReason> {
        self.require(node, &[NodeType::TabSet])?;
        for tab in self.children(node).to_vec() {
            self.close_listeners(&tab);
        }
        self.detach(node);
        self.discard_subtree(node);
        self.tidy();
        Ok(())
    }

    /// Tabsets select and activate. On a border, selecting the tab that is
    /// already showing closes the panel.
    fn select_tab(&mut self, tab: &NodeId) -> Result<(), IgnoreReason> {
        self.require(tab, &[NodeType::Tab])?;
        let (parent, index) = self
            .position_in_parent(tab)
            .ok_or_else(|| IgnoreReason::MissingNode { id: tab.clone() })?;
        match self.nodes.get_mut(&parent).map(|n| &mut n.kind) {
            Some(NodeKind::Border(border)) => {
                if border.open && border.selected == Some(index) {
                    border.open = false;
                } else {
                    border.selected = Some(index);
                    border.open = true;
                }
            }
            Some(NodeKind::TabSet(tabset)) => {
                tabset.selected = Some(index);
                self.active_tabset = Some(parent);
            }
            _ => {}
        }
        self.dirty = true;
        Ok(())
    }

    /// Rescale the requested weights to the pair's current sum, then keep
    /// each side at or above its minimum size. Explicit pixel sizes follow
    /// the drag.
    fn adjust_split(&mut self, first: (&NodeId, f64, i32), second: (&NodeId, f64, i32)) -> Result<(), IgnoreReason> {
        let (node1, weight1, pixels1) = first;
        let (node2, weight2, pixels2) = second;
        self.require(node1, &[NodeType::Row, NodeType::TabSet])?;
        self.require(node2, &[NodeType::Row, NodeType::TabSet])?;
        let parent1 = self.nodes.get(node1).and_then(|n| n.parent.clone());
        let parent2 = self.nodes.get(node2).and_then(|n| n.parent.clone());
        let Some(row) = parent1.filter(|p| Some(p) == parent2.as_ref()) else {
            return Err(IgnoreReason::NotSiblings);
        };
        if node1 == node2 {
            return Err(IgnoreReason::NotSiblings);
        }
        let orientation = self.row_orientation(&row);

        let old_sum = self.weight_of(node1) + self.weight_of(node2);
        let (req1, req2) = (weight1.max(0.0), weight2.max(0.0));
        let requested = req1 + req2;
        let (mut w1, mut w2) = if old_sum <= 0.0 {
            (req1, req2)
        } else if requested <= 0.0 {
            (self.weight_of(node1), self.weight_of(node2))
        } else {
            let w1 = req1 * old_sum / requested;
            (w1, old_sum - w1)
        };

        let sum = w1 + w2;
        let pixels = pixels1.max(0) + pixels2.max(0);
        if pixels > 0 && sum > 0.0 {
            let min1 = f64::from(self.min_size(node1, orientation)) / f64::from(pixels) * sum;
            let min2 = f64::from(self.min_size(node2, orientation)) / f64::from(pixels) * sum;
            if min1 + min2 <= sum {
                if w1 < min1 {
                    w1 = min1;
                    w2 = sum - w1;
                } else if w2 < min2 {
                    w2 = min2;
                    w1 = sum - w2;
                }
            }
        }

        for (node, weight, px) in [(node1, w1, pixels1), (node2, w2, pixels2)] {
            if let Some(n) = self.nodes.get_mut(node) {
                n.set_weight(weight);
                n.set_pref_size(orientation, px);
            }
        }
        self.dirty = true;
        Ok(())
    }

    /// Clamp to the border's minimum and, once laid out, to the space the
    /// center can give up.
    fn adjust_border_split(&mut self, node: &NodeId, size: i32) -> Result<(), IgnoreReason> {
        self.require(node, &[NodeType::Border])?;
        let Some(border) = self.nodes.get(node).and_then(Node::as_border) else {
            return Err(IgnoreReason::MissingNode { id: node.clone() });
        };
        let min = self.border_min_size(border);
        let axis = border.location.orientation();
        let max = self
            .layout_rect
            .map(|_| border.adjusted_size.saturating_add(self.border_inner.size(axis).max(0)));
        let mut size = size.max(min);
        if let Some(max) = max {
            size = size.min(max.max(min));
        }
        if let Some(border) = self.nodes.get_mut(node).and_then(Node::as_border_mut) {
            border.size = size;
        }
        self.dirty = true;
        Ok(())
    }

    fn maximize_toggle(&mut self, node: &NodeId) -> Result<(), IgnoreReason> {
        self.require(node, &[NodeType::TabSet])?;
        if !self.is_maximize_enabled(node) {
            return Err(IgnoreReason::MaximizeDisabled { id: node.clone() });
        }
        if self.maximized_tabset.as_ref() == Some(node) {
            self.maximized_tabset = None;
            self.emit(node, EventPayload::Maximize { maximized: false });
        } else {
            if let Some(previous) = self.maximized_tabset.replace(node.clone()) {
                self.emit(&previous, EventPayload::Maximize { maximized: false });
            }
            self.active_tabset = Some(node.clone());
            self.emit(node, EventPayload::Maximize { maximized: true });
        }
        self.dirty = true;
        Ok(())
    }

    fn update_node_attributes(&mut self, node: &NodeId, json: &Map<String, Value>) -> Result<(), IgnoreReason> {
        let found = self.require(
            node,
            &[NodeType::Row, NodeType::TabSet, NodeType::Tab, NodeType::Border],
        )?;
        let defs: &AttributeDefinitions = found
            .attribute_definitions()
            .ok_or_else(|| IgnoreReason::UnexpectedNodeType { id: node.clone(), found })?;
        if let Some(n) = self.nodes.get_mut(node) {
            defs.update(json, n);
        }
        self.normalize_selection(node);
        self.dirty = true;
        Ok(())
    }

    // ── Splitter drags ──────────────────────────────────────────────────

    /// The two row children a splitter separates.
    fn split_pair(&self, row: &NodeId, splitter: &str) -> Option<(NodeId, NodeId)> {
        let node = self.nodes.get(row)?;
        let index = node.as_row()?.splitters.iter().position(|s| s.as_str() == splitter)?;
        Some((node.children.get(index)?.clone(), node.children.get(index + 1)?.clone()))
    }

    /// Range the leading edge of a splitter may be dragged within, honoring
    /// the minimum sizes on both sides when they fit.
    #[must_use]
    pub fn splitter_bounds(&self, splitter: &str) -> Option<(i32, i32)> {
        let node = self.nodes.get(splitter)?;
        let parent = node.parent.as_ref()?;
        let splitter_size = self.config.splitter_size.max(0);
        match &self.nodes.get(parent)?.kind {
            NodeKind::Row(_) => {
                let (c1, c2) = self.split_pair(parent, splitter)?;
                let orientation = self.row_orientation(parent);
                let lo = axis_start(self.nodes.get(&c1)?.rect, orientation);
                let hi = axis_end(self.nodes.get(&c2)?.rect, orientation).saturating_sub(splitter_size);
                let lo_min = lo.saturating_add(self.min_size(&c1, orientation));
                let hi_min = hi.saturating_sub(self.min_size(&c2, orientation));
                Some(if lo_min <= hi_min { (lo_min, hi_min) } else { (lo, hi.max(lo)) })
            }
            NodeKind::Border(border) => {
                let axis = border.location.orientation();
                let min = self.border_min_size(border);
                let (outer, inner) = (self.border_outer, self.border_inner);
                let (lo, hi) = match border.location {
                    DockLocation::Left | DockLocation::Top => {
                        (
                            axis_start(outer, axis).saturating_add(min),
                            axis_end(inner, axis).saturating_sub(splitter_size),
                        )
                    }
                    DockLocation::Right | DockLocation::Bottom | DockLocation::Center => {
                        (
                            axis_start(inner, axis),
                            axis_end(outer, axis).saturating_sub(splitter_size).saturating_sub(min),
                        )
                    }
                };
                Some((lo, hi.max(lo)))
            }
            _ => None,
        }
    }

    /// Action a splitter drag ending with the splitter's leading edge at
    /// `position` should dispatch.
    #[must_use]
    pub fn split_action(&self, splitter: &str, position: i32) -> Option<Action> {
        let (lo, hi) = self.splitter_bounds(splitter)?;
        let position = position.clamp(lo, hi);
        let parent = self.nodes.get(splitter)?.parent.as_ref()?;
        let splitter_size = self.config.splitter_size.max(0);
        match &self.nodes.get(parent)?.kind {
            NodeKind::Row(_) => {
                let (c1, c2) = self.split_pair(parent, splitter)?;
                let orientation = self.row_orientation(parent);
                let pixel_width1 = position - axis_start(self.nodes.get(&c1)?.rect, orientation);
                let pixel_width2 = axis_end(self.nodes.get(&c2)?.rect, orientation)
                    .saturating_sub(splitter_size)
                    .saturating_sub(position);
                let sum = self.weight_of(&c1) + self.weight_of(&c2);
                let total = pixel_width1 + pixel_width2;
                let (weight1, weight2) = if total > 0 {
                    (
                        sum * f64::from(pixel_width1) / f64::from(total),
                        sum * f64::from(pixel_width2) / f64::from(total),
                    )
                } else {
                    (self.weight_of(&c1), self.weight_of(&c2))
                };
                Some(Action::AdjustSplit {
                    node1: c1,
                    weight1,
                    pixel_width1,
                    node2: c2,
                    weight2,
                    pixel_width2,
                })
            }
            NodeKind::Border(border) => {
                let axis = border.location.orientation();
                let size = match border.location {
                    DockLocation::Left | DockLocation::Top => position - axis_start(self.border_outer, axis),
                    DockLocation::Right | DockLocation::Bottom | DockLocation::Center => {
                        axis_end(self.border_outer, axis)
                            .saturating_sub(position)
                            .saturating_sub(splitter_size)
                    }
                };
                Some(Action::adjust_border_split(parent, size))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexdock_core::geometry::Rect;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn model() -> Model {
        let mut model = Model::from_json(&json!({
            "borders": [{"type": "border", "location": "right", "id": "rb",
                         "children": [{"type": "tab", "id": "props"}, {"type": "tab", "id": "help"}]}],
            "layout": {"type": "row", "children": [
                {"type": "tabset", "id": "ts1", "weight": 50, "children": [
                    {"type": "tab", "id": "fx", "name": "FX"}
                ]},
                {"type": "tabset", "id": "ts2", "weight": 50, "children": [
                    {"type": "tab", "id": "fi", "name": "FI"}
                ]}
            ]}
        }))
        .unwrap();
        model.layout(Rect::new(0, 0, 1025, 500));
        model
    }

    #[test]
    fn move_to_center_appends_and_tidies() {
        let mut model = model();
        let outcome = model.dispatch(Action::move_node("fx", "ts2", DockLocation::Center, None));
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(model.children("ts2"), &[NodeId::from("fi"), NodeId::from("fx")]);
        assert_eq!(model.selected_node("ts2").unwrap().id().as_str(), "fx");
        assert!(!model.contains("ts1"));
        assert_eq!(model.node("ts2").unwrap().rect(), Rect::new(0, 0, 1000, 500));
    }

    #[test]
    fn stale_ids_are_ignored() {
        let mut model = model();
        let before = model.to_json();
        assert_eq!(
            model.dispatch(Action::delete_tab("gone")),
            ActionOutcome::Ignored(IgnoreReason::MissingNode { id: "gone".into() })
        );
        assert_eq!(
            model.dispatch(Action::move_node("fx", "gone", DockLocation::Left, None)),
            ActionOutcome::Ignored(IgnoreReason::MissingNode { id: "gone".into() })
        );
        assert_eq!(
            model.dispatch(Action::select_tab("ts1")),
            ActionOutcome::Ignored(IgnoreReason::UnexpectedNodeType {
                id: "ts1".into(),
                found: NodeType::TabSet
            })
        );
        assert_eq!(model.to_json(), before);
    }

    #[test]
    fn self_drop_is_noop() {
        let mut model = model();
        let before = model.to_json();
        assert_eq!(
            model.dispatch(Action::move_node("ts1", "ts1", DockLocation::Center, None)),
            ActionOutcome::Ignored(IgnoreReason::SelfDrop)
        );
        assert_eq!(model.to_json(), before);
    }

    #[test]
    fn add_node_to_border_and_tabset() {
        let mut model = model();
        let outcome = model.dispatch(Action::add_node(
            json!({"type": "tab", "id": "new", "name": "New"}),
            "rb",
            DockLocation::Center,
            Some(0),
        ));
        assert!(outcome.is_applied());
        assert_eq!(model.children("rb")[0].as_str(), "new");

        let outcome = model.dispatch(Action::add_node(
            json!({"type": "tabset", "children": [{"type": "tab"}]}),
            "rb",
            DockLocation::Center,
            None,
        ));
        assert!(matches!(outcome, ActionOutcome::Ignored(IgnoreReason::UnexpectedNodeType { .. })));

        let outcome = model.dispatch(Action::add_node(json!({"name": "x"}), "ts1", DockLocation::Center, None));
        assert!(matches!(outcome, ActionOutcome::Ignored(IgnoreReason::InvalidNodeJson { .. })));
        assert_eq!(
            model.dispatch(Action::add_node(json!({"type": "tab"}), "rb", DockLocation::Left, None)),
            ActionOutcome::Ignored(IgnoreReason::UnsupportedLocation { location: DockLocation::Left })
        );
    }

    #[test]
    fn select_tab_toggles_border() {
        let mut model = model();
        model.dispatch(Action::select_tab("help"));
        let border = model.node("rb").unwrap().as_border().unwrap();
        assert!(border.is_open());
        assert_eq!(border.selected(), Some(1));
        model.dispatch(Action::select_tab("help"));
        assert!(!model.node("rb").unwrap().as_border().unwrap().is_open());
    }

    #[test]
    fn select_tab_activates_tabset() {
        let mut model = model();
        model.dispatch(Action::select_tab("fi"));
        assert_eq!(model.active_tabset().unwrap().as_str(), "ts2");
    }

    #[test]
    fn split_action_scales_weights() {
        let mut model = model();
        let splitter = model.draw_children(model.root())[1].clone();
        // Row is 1000 wide: 496 | 8 | 496.
        let action = model.split_action(&splitter, 596).unwrap();
        let Action::AdjustSplit { weight1, weight2, pixel_width1, pixel_width2, .. } = &action else {
            panic!("expected adjust_split, got {action:?}");
        };
        assert_eq!((*pixel_width1, *pixel_width2), (596, 396));
        assert!((weight1 + weight2 - 100.0).abs() < 1e-9);
        model.dispatch(action);
        let w1 = model.node("ts1").unwrap().weight();
        assert!((w1 / 100.0 - 0.6).abs() < 0.01);
    }

    #[test]
    fn adjust_split_respects_min_size() {
        let mut model = model();
        model.dispatch(Action::update_node_attributes(
            "ts2",
            json!({"minWidth": 300}).as_object().unwrap().clone(),
        ));
        model.dispatch(Action::AdjustSplit {
            node1: "ts1".into(),
            weight1: 90.0,
            pixel_width1: 900,
            node2: "ts2".into(),
            weight2: 10.0,
            pixel_width2: 100,
        });
        let w2 = model.node("ts2").unwrap().weight();
        assert!((w2 - 30.0).abs() < 1e-9);
        assert!((model.node("ts1").unwrap().weight() + w2 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn border_split_clamps() {
        let mut model = model();
        model.dispatch(Action::select_tab("props"));
        model.dispatch(Action::adjust_border_split("rb", 5000));
        let border = model.node("rb").unwrap().as_border().unwrap();
        // Bar 25, splitter 8: the panel may take the whole rest.
        assert_eq!(border.size(), 1025 - 25 - 8);
        model.dispatch(Action::adjust_border_split("rb", -10));
        assert_eq!(model.node("rb").unwrap().as_border().unwrap().size(), 0);
    }

    #[test]
    fn border_splitter_drag_resizes_panel() {
        let mut model = model();
        model.dispatch(Action::select_tab("props"));
        let splitter = model.node("rb").unwrap().as_border().unwrap().splitter().unwrap().clone();
        // Right border: panel 200, splitter at 1000 - 200 - 8 = 792.
        assert_eq!(model.node(&splitter).unwrap().rect().x, 792);
        let action = model.split_action(&splitter, 692).unwrap();
        assert_eq!(action, Action::adjust_border_split("rb", 300));
    }

    #[test]
    fn maximize_toggle_moves_between_tabsets() {
        let mut model = model();
        let events = Rc::new(RefCell::new(Vec::new()));
        for id in ["ts1", "ts2"] {
            let sink = Rc::clone(&events);
            model.set_event_listener(id, crate::event::NodeEvent::Maximize, move |p| {
                sink.borrow_mut().push((id, *p));
            });
        }
        model.dispatch(Action::maximize_toggle("ts2"));
        model.dispatch(Action::maximize_toggle("ts1"));
        assert_eq!(model.maximized_tabset().unwrap().as_str(), "ts1");
        assert_eq!(model.node("ts1").unwrap().rect(), model.center_rect());
        assert_eq!(
            *events.borrow(),
            [
                ("ts2", EventPayload::Maximize { maximized: true }),
                ("ts2", EventPayload::Maximize { maximized: false }),
                ("ts1", EventPayload::Maximize { maximized: true }),
            ]
        );
        model.dispatch(Action::maximize_toggle("ts1"));
        assert!(model.maximized_tabset().is_none());
    }

    #[test]
    fn delete_tab_fires_close_and_drops_listeners() {
        let mut model = model();
        let closed = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&closed);
        model.set_event_listener("fx", crate::event::NodeEvent::Close, move |_| *sink.borrow_mut() += 1);
        model.dispatch(Action::delete_tab("fx"));
        assert_eq!(*closed.borrow(), 1);
        assert!(!model.contains("fx"));
        assert!(!model.contains("ts1"));
        assert!(!model.remove_event_listener("fx", crate::event::NodeEvent::Close));
    }

    #[test]
    fn delete_last_tabset_leaves_fresh_one() {
        let mut model = model();
        model.dispatch(Action::delete_tabset("ts1"));
        model.dispatch(Action::delete_tabset("ts2"));
        let children = model.children(model.root());
        assert_eq!(children.len(), 1);
        assert_eq!(model.active_tabset(), Some(&children[0]));
    }

    #[test]
    fn change_listener_sees_applied_actions_only() {
        let mut model = model();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        model.set_change_listener(move |a| sink.borrow_mut().push(a.kind()));
        model.dispatch(Action::rename_tab("fx", "Renamed"));
        model.dispatch(Action::rename_tab("missing", "x"));
        assert_eq!(*seen.borrow(), [ActionKind::RenameTab]);
        assert_eq!(model.node("fx").unwrap().name(), Some("Renamed"));
    }

    #[test]
    fn interceptor_bypasses_reducer() {
        let mut model = model();
        let taken = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&taken);
        model.set_interceptor(move |a| sink.borrow_mut().push(a));
        assert_eq!(model.dispatch(Action::delete_tab("fx")), ActionOutcome::Intercepted);
        assert!(model.contains("fx"));
        assert_eq!(*taken.borrow(), [Action::delete_tab("fx")]);
        model.clear_interceptor();
        assert!(model.dispatch(Action::delete_tab("fx")).is_applied());
    }

    #[test]
    fn actions_serialize_with_type_tag() {
        let action = Action::move_node("a", "b", DockLocation::Left, Some(2));
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({"type": "move_node", "from_node": "a", "to_node": "b", "location": "left", "index": 2})
        );
        let back: Action = serde_json::from_value(value).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn update_model_attributes_relayouts() {
        let mut model = model();
        model.dispatch(Action::update_model_attributes(
            json!({"splitterSize": 20}).as_object().unwrap().clone(),
        ));
        assert_eq!(model.config().splitter_size, 20);
        assert_eq!(model.node("ts1").unwrap().rect().width, 490);
    }
}
