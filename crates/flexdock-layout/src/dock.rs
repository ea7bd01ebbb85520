#![forbid(unsafe_code)]

//! Committing a drop: re-parenting a dragged node at its target.

use crate::dock_location::DockLocation;
use crate::logging::debug;
use crate::model::Model;
use crate::node::{NodeId, NodeKind, NodeType, RowNode, TabSetNode};

/// Weight share of the new tabset when docking to the top or bottom edge.
const EDGE_DOCK_SHARE: f64 = 25.0;

impl Model {
    /// Move `drag` (attached or freshly built) to `target` at `location`.
    ///
    /// Callers have already checked that the target accepts the node.
    pub(crate) fn drop_node(
        &mut self,
        drag: &NodeId,
        target: &NodeId,
        location: DockLocation,
        index: Option<usize>,
    ) {
        debug!(drag = %drag, target = %target, %location, ?index, "drop");
        match self.node_type_of(target) {
            Some(NodeType::TabSet) => self.drop_on_tabset(drag, target, location, index),
            Some(NodeType::Border) => self.drop_on_border(drag, target, index),
            Some(NodeType::Row) => self.drop_on_row(drag, target, location),
            _ => return,
        }
        self.tidy();
    }

    /// Detach `drag` and shift `index` when it moves forward within the
    /// same parent.
    fn detach_for_drop(&mut self, drag: &NodeId, target: &NodeId, index: Option<usize>) -> Option<usize> {
        let from = self.detach(drag);
        match (from, index) {
            (Some((parent, from)), Some(i)) if parent == *target && from < i && i > 0 => Some(i - 1),
            _ => index,
        }
    }

    /// Wrap a lone tab in a fresh tabset; tabsets move as they are.
    fn as_tabset(&mut self, drag: &NodeId) -> NodeId {
        if self.node_type_of(drag) != Some(NodeType::Tab) {
            return drag.clone();
        }
        let tabset = self.create_node(NodeKind::TabSet(TabSetNode::default()));
        self.insert_child(&tabset, drag, None);
        tabset
    }

    fn drop_on_tabset(&mut self, drag: &NodeId, target: &NodeId, location: DockLocation, index: Option<usize>) {
        if drag == target {
            return;
        }
        let index = self.detach_for_drop(drag, target, index);

        if location == DockLocation::Center {
            if self.node_type_of(drag) == Some(NodeType::Tab) {
                let at = self.insert_child(target, drag, index);
                self.set_selected(target, at);
            } else {
                let tabs = self.children(drag).to_vec();
                let mut at = index.unwrap_or(usize::MAX);
                for (i, tab) in tabs.iter().enumerate() {
                    self.detach(tab);
                    at = self.insert_child(target, tab, Some(at)) + 1;
                    if i == 0 {
                        self.set_selected(target, at - 1);
                    }
                }
                self.discard_subtree(drag);
            }
            self.active_tabset = Some(target.clone());
            return;
        }

        let tabset = self.as_tabset(drag);
        let Some((parent, pos)) = self.position_in_parent(target) else {
            return;
        };
        if self.row_orientation(&parent) == location.orientation() {
            let half = self.weight_of(target) / 2.0;
            self.set_weight(target, half);
            self.set_weight(&tabset, half);
            self.insert_child(&parent, &tabset, Some(pos + location.index_offset()));
        } else {
            let row = self.create_node(NodeKind::Row(RowNode::default()));
            self.set_weight(&row, self.weight_of(target));
            self.detach(target);
            self.insert_child(&parent, &row, Some(pos));
            self.insert_child(&row, target, None);
            self.set_weight(target, 50.0);
            self.set_weight(&tabset, 50.0);
            self.insert_child(&row, &tabset, Some(location.index_offset()));
        }
        self.active_tabset = Some(tabset);
    }

    fn drop_on_border(&mut self, drag: &NodeId, border: &NodeId, index: Option<usize>) {
        let index = self.detach_for_drop(drag, border, index);
        let at = self.insert_child(border, drag, index);
        let open = self
            .nodes
            .get(border)
            .and_then(|n| n.as_border())
            .is_some_and(|b| b.open);
        if open {
            self.set_selected(border, at);
        }
    }

    /// Edge dock against the root row.
    fn drop_on_row(&mut self, drag: &NodeId, row: &NodeId, location: DockLocation) {
        self.detach(drag);
        let tabset = self.as_tabset(drag);
        let sum: f64 = self.children(row).iter().map(|c| self.weight_of(c)).sum();
        self.set_weight(&tabset, if sum > 0.0 { sum / 3.0 } else { 100.0 });

        match location {
            DockLocation::Left => {
                self.insert_child(row, &tabset, Some(0));
            }
            DockLocation::Right => {
                self.insert_child(row, &tabset, None);
            }
            DockLocation::Top | DockLocation::Bottom => {
                let vrow = self.create_node(NodeKind::Row(RowNode::default()));
                let hrow = self.create_node(NodeKind::Row(RowNode::default()));
                for child in self.children(row).to_vec() {
                    self.detach(&child);
                    self.insert_child(&hrow, &child, None);
                }
                self.set_weight(&tabset, EDGE_DOCK_SHARE);
                self.set_weight(&hrow, 100.0 - EDGE_DOCK_SHARE);
                let order = if location == DockLocation::Top {
                    [&tabset, &hrow]
                } else {
                    [&hrow, &tabset]
                };
                for child in order {
                    self.insert_child(&vrow, child, None);
                }
                self.insert_child(row, &vrow, None);
            }
            DockLocation::Center => return,
        }
        self.active_tabset = Some(tabset);
    }

    pub(crate) fn position_in_parent(&self, id: &NodeId) -> Option<(NodeId, usize)> {
        let parent = self.nodes.get(id)?.parent.clone()?;
        let pos = self.children(&parent).iter().position(|c| c == id)?;
        Some((parent, pos))
    }
}
