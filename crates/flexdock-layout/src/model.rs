#![forbid(unsafe_code)]

//! The document model: node arena, structural edits and tidy.
//!
//! All nodes live in one `BTreeMap` keyed by id. `children` is the owning
//! order and `parent` the back-reference; the two are kept consistent by
//! [`Model::insert_child`] and [`Model::detach`], the only places that edit
//! structure.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use flexdock_core::geometry::{Insets, Orientation, Rect};
use serde_json::Value;

use crate::attribute::AttributeTarget;
use crate::config::ModelConfig;
use crate::dock_location::DockLocation;
use crate::drop_target::AllowDropCallback;
use crate::event::{ChangeListener, EventListener, NodeEvent};
use crate::logging::debug;
use crate::node::{BorderNode, Node, NodeId, NodeKind, NodeType, RowNode, TabSetNode};

/// Interceptor taking over action handling from the built-in reducer.
pub(crate) type ActionInterceptor = Box<dyn FnMut(crate::action::Action)>;

/// Docking-layout document.
pub struct Model {
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) root: NodeId,
    pub(crate) borders: Vec<NodeId>,
    pub(crate) config: ModelConfig,
    pub(crate) next_id: u64,
    pub(crate) active_tabset: Option<NodeId>,
    pub(crate) maximized_tabset: Option<NodeId>,
    pub(crate) dirty: bool,
    /// Rectangle of the last layout pass; actions re-run layout against it.
    pub(crate) layout_rect: Option<Rect>,
    /// Layout rectangle minus border bars.
    pub(crate) border_outer: Rect,
    /// Rectangle left for the root row after border panels.
    pub(crate) border_inner: Rect,
    pub(crate) listeners: BTreeMap<(NodeId, NodeEvent), EventListener>,
    pub(crate) change_listener: Option<ChangeListener>,
    pub(crate) interceptor: Option<ActionInterceptor>,
    pub(crate) allow_drop: Option<AllowDropCallback>,
}

impl Default for Model {
    /// An empty layout: a root row holding one empty tabset.
    fn default() -> Self {
        let mut model = Self::bare(ModelConfig::default());
        let root = model.create_node(NodeKind::Row(RowNode::default()));
        model.root = root;
        model.tidy();
        model
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("root", &self.root)
            .field("borders", &self.borders)
            .field("nodes", &self.nodes.len())
            .field("active_tabset", &self.active_tabset)
            .field("maximized_tabset", &self.maximized_tabset)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Model with no nodes; the loader installs the root.
    pub(crate) fn bare(config: ModelConfig) -> Self {
        Self {
            nodes: BTreeMap::new(),
            root: NodeId::new(String::new()),
            borders: Vec::new(),
            config,
            next_id: 0,
            active_tabset: None,
            maximized_tabset: None,
            dirty: true,
            layout_rect: None,
            border_outer: Rect::empty(),
            border_inner: Rect::empty(),
            listeners: BTreeMap::new(),
            change_listener: None,
            interceptor: None,
            allow_drop: None,
        }
    }

    // ── Read API ────────────────────────────────────────────────────────

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All arena nodes (splitters included) in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    #[must_use]
    pub fn root(&self) -> &NodeId {
        &self.root
    }

    #[must_use]
    pub fn borders(&self) -> &[NodeId] {
        &self.borders
    }

    #[must_use]
    pub fn border(&self, location: DockLocation) -> Option<&Node> {
        self.borders
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .find(|node| node.as_border().is_some_and(|b| b.location == location))
    }

    #[must_use]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Owned children; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: &str) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Children interleaved with the splitters between them, in paint order.
    #[must_use]
    pub fn draw_children(&self, id: &str) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let splitters: &[NodeId] = node.as_row().map_or(&[], |row| row.splitters.as_slice());
        let mut out = Vec::with_capacity(node.children.len() + splitters.len());
        for (i, child) in node.children.iter().enumerate() {
            if i > 0 {
                if let Some(splitter) = splitters.get(i - 1) {
                    out.push(splitter.clone());
                }
            }
            out.push(child.clone());
        }
        out
    }

    /// The selected tab of a tabset or border.
    #[must_use]
    pub fn selected_node(&self, id: &str) -> Option<&Node> {
        let node = self.nodes.get(id)?;
        let child = node.children.get(node.selected()?)?;
        self.nodes.get(child)
    }

    /// Layout axis of a row, drag axis of a splitter, or the dividing axis
    /// of a border.
    #[must_use]
    pub fn orientation(&self, id: &str) -> Option<Orientation> {
        let node = self.nodes.get(id)?;
        match &node.kind {
            NodeKind::Row(_) => Some(self.row_orientation(&node.id)),
            NodeKind::Splitter(splitter) => Some(splitter.axis),
            NodeKind::Border(border) => Some(border.location.orientation()),
            NodeKind::TabSet(_) | NodeKind::Tab(_) => None,
        }
    }

    #[must_use]
    pub fn active_tabset(&self) -> Option<&NodeId> {
        self.active_tabset.as_ref()
    }

    #[must_use]
    pub fn maximized_tabset(&self) -> Option<&NodeId> {
        self.maximized_tabset.as_ref()
    }

    /// Whether structure changed since the last layout pass.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rectangle passed to the last layout pass.
    #[must_use]
    pub fn layout_rect(&self) -> Option<Rect> {
        self.layout_rect
    }

    /// Pre-order walk over borders then the root row, passing depth.
    /// Splitters are not visited.
    pub fn visit_nodes(&self, mut visitor: impl FnMut(&Node, usize)) {
        for border in &self.borders {
            self.visit_from(border, 0, &mut visitor);
        }
        self.visit_from(&self.root, 0, &mut visitor);
    }

    fn visit_from(&self, id: &NodeId, depth: usize, visitor: &mut impl FnMut(&Node, usize)) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        visitor(node, depth);
        for child in &node.children {
            self.visit_from(child, depth + 1, visitor);
        }
    }

    /// Attribute value with inherited fallback to the global config.
    #[must_use]
    pub fn attribute(&self, id: &str, name: &str) -> Option<Value> {
        let node = self.nodes.get(id)?;
        if let Some(value) = node.get(name) {
            return Some(value);
        }
        let fallback = node
            .node_type()
            .attribute_definitions()?
            .model_fallback(name)?;
        self.config.get(fallback)
    }

    // ── Resolved attributes ─────────────────────────────────────────────

    /// Whether a tab or tabset may be dragged.
    #[must_use]
    pub fn is_drag_enabled(&self, id: &str) -> bool {
        match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::Tab(tab)) => tab.enable_drag.unwrap_or(self.config.tab_enable_drag),
            Some(NodeKind::TabSet(ts)) => ts.enable_drag.unwrap_or(self.config.tab_set_enable_drag),
            _ => false,
        }
    }

    /// Whether a tabset or border accepts center drops. Rows always do.
    #[must_use]
    pub fn is_drop_enabled(&self, id: &str) -> bool {
        match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::TabSet(ts)) => ts.enable_drop.unwrap_or(self.config.tab_set_enable_drop),
            Some(NodeKind::Border(b)) => b.enable_drop.unwrap_or(self.config.border_enable_drop),
            Some(NodeKind::Row(_)) => true,
            _ => false,
        }
    }

    /// Whether a tabset may be split by an edge drop. Rows always may.
    #[must_use]
    pub fn is_divide_enabled(&self, id: &str) -> bool {
        match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::TabSet(ts)) => {
                ts.enable_divide.unwrap_or(self.config.tab_set_enable_divide)
            }
            Some(NodeKind::Row(_)) => true,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_maximize_enabled(&self, id: &str) -> bool {
        self.nodes
            .get(id)
            .and_then(Node::as_tabset)
            .is_some_and(|ts| ts.enable_maximize.unwrap_or(self.config.tab_set_enable_maximize))
    }

    #[must_use]
    pub fn is_close_enabled(&self, id: &str) -> bool {
        self.nodes
            .get(id)
            .and_then(Node::as_tab)
            .is_some_and(|tab| tab.enable_close.unwrap_or(self.config.tab_enable_close))
    }

    #[must_use]
    pub fn is_rename_enabled(&self, id: &str) -> bool {
        self.nodes
            .get(id)
            .and_then(Node::as_tab)
            .is_some_and(|tab| tab.enable_rename.unwrap_or(self.config.tab_enable_rename))
    }

    pub(crate) fn tabset_margin_insets(&self, ts: &TabSetNode) -> Insets {
        ts.margin_insets.unwrap_or(self.config.tab_set_margin_insets)
    }

    pub(crate) fn tabset_border_insets(&self, ts: &TabSetNode) -> Insets {
        ts.border_insets.unwrap_or(self.config.tab_set_border_insets)
    }

    pub(crate) fn tabset_header_height(&self, ts: &TabSetNode) -> i32 {
        ts.header_height.unwrap_or(self.config.tab_set_header_height).max(0)
    }

    pub(crate) fn tabset_tab_strip_height(&self, ts: &TabSetNode) -> i32 {
        ts.tab_strip_height
            .unwrap_or(self.config.tab_set_tab_strip_height)
            .max(0)
    }

    pub(crate) fn tabset_tab_strip_enabled(&self, ts: &TabSetNode) -> bool {
        ts.enable_tab_strip.unwrap_or(self.config.tab_set_enable_tab_strip)
    }

    pub(crate) fn tabset_delete_when_empty(&self, ts: &TabSetNode) -> bool {
        ts.enable_delete_when_empty
            .unwrap_or(self.config.tab_set_enable_delete_when_empty)
    }

    pub(crate) fn border_bar_size(&self, border: &BorderNode) -> i32 {
        border.bar_size.unwrap_or(self.config.border_bar_size).max(0)
    }

    pub(crate) fn border_min_size(&self, border: &BorderNode) -> i32 {
        border.min_size.unwrap_or(self.config.border_min_size).max(0)
    }

    /// Minimum pixel size of a row child along `orientation`.
    pub(crate) fn min_size(&self, id: &NodeId, orientation: Orientation) -> i32 {
        let Some(ts) = self.nodes.get(id).and_then(Node::as_tabset) else {
            return 0;
        };
        let min = match orientation {
            Orientation::Horz => ts.min_width.unwrap_or(self.config.tab_set_min_width),
            Orientation::Vert => ts.min_height.unwrap_or(self.config.tab_set_min_height),
        };
        min.max(0)
    }

    /// A border is showing when enabled and non-empty.
    pub(crate) fn border_showing(&self, id: &NodeId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|n| n.as_border().is_some_and(|b| b.show) && !n.children.is_empty())
    }

    /// Root rows lay out horizontally; each nested row flips.
    pub(crate) fn row_orientation(&self, row: &NodeId) -> Orientation {
        let mut orientation = Orientation::Horz;
        let mut current = self.nodes.get(row).and_then(|n| n.parent.as_ref());
        while let Some(parent) = current {
            orientation = orientation.flip();
            current = self.nodes.get(parent).and_then(|n| n.parent.as_ref());
        }
        orientation
    }

    pub(crate) fn node_type_of(&self, id: &str) -> Option<NodeType> {
        self.nodes.get(id).map(Node::node_type)
    }

    pub(crate) fn weight_of(&self, id: &NodeId) -> f64 {
        self.nodes.get(id).map_or(0.0, Node::weight)
    }

    pub(crate) fn set_weight(&mut self, id: &NodeId, weight: f64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.set_weight(weight);
        }
    }

    pub(crate) fn set_selected(&mut self, id: &NodeId, index: usize) {
        if let Some(node) = self.nodes.get_mut(id) {
            let len = node.children.len();
            if let Some(selected) = node.selected_mut() {
                *selected = (len > 0).then(|| index.min(len - 1));
            }
        }
    }

    /// Clamp a tabset or border selection into range.
    pub(crate) fn normalize_selection(&mut self, id: &NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let len = node.children.len();
        if let Some(selected) = node.selected_mut() {
            *selected = match *selected {
                _ if len == 0 => None,
                Some(s) => Some(s.min(len - 1)),
                None => Some(0),
            };
        }
        if let Some(border) = node.as_border_mut() {
            if border.selected.is_none() {
                border.open = false;
            }
        }
    }

    // ── Arena edits ─────────────────────────────────────────────────────

    /// Allocate `#<n>`, skipping ids in use or `reserved`.
    pub(crate) fn next_unique_id(&mut self, reserved: &BTreeSet<String>) -> NodeId {
        loop {
            self.next_id += 1;
            let candidate = format!("#{}", self.next_id);
            if !self.nodes.contains_key(candidate.as_str()) && !reserved.contains(&candidate) {
                return NodeId::from(candidate);
            }
            debug!(id = %candidate, "id already taken, skipping");
        }
    }

    /// Insert a detached node with a fresh id.
    pub(crate) fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.next_unique_id(&BTreeSet::new());
        self.nodes.insert(id.clone(), Node::new(id.clone(), kind));
        self.dirty = true;
        id
    }

    /// Insert `child` under `parent` at `index` (clamped; `None` appends).
    ///
    /// A tabset or border keeps its selection on the same tab, and selects
    /// the first tab it receives.
    pub(crate) fn insert_child(&mut self, parent: &NodeId, child: &NodeId, index: Option<usize>) -> usize {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return 0;
        };
        let len = parent_node.children.len();
        let index = index.unwrap_or(len).min(len);
        parent_node.children.insert(index, child.clone());
        if let Some(selected) = parent_node.selected_mut() {
            *selected = match *selected {
                None => Some(0),
                Some(s) if index <= s => Some(s + 1),
                Some(s) => Some(s),
            };
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent.clone());
        }
        self.dirty = true;
        index
    }

    /// Remove `child` from its parent, returning the parent and the index it
    /// held. The parent's selection shifts down when the removed tab was at
    /// or before it and clears when the parent empties.
    pub(crate) fn detach(&mut self, child: &NodeId) -> Option<(NodeId, usize)> {
        let parent_id = self.nodes.get(child)?.parent.clone()?;
        let parent = self.nodes.get_mut(&parent_id)?;
        let index = parent.children.iter().position(|c| c == child)?;
        parent.children.remove(index);
        let remaining = parent.children.len();
        if let Some(selected) = parent.selected_mut() {
            *selected = selection_after_removal(*selected, index, remaining);
        }
        // An emptied border closes; a later drop must not reopen it.
        if remaining == 0 {
            if let Some(border) = parent.as_border_mut() {
                border.open = false;
            }
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        self.dirty = true;
        Some((parent_id, index))
    }

    /// Drop a detached node and everything below it from the arena.
    pub(crate) fn discard_subtree(&mut self, id: &NodeId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        for child in &node.children {
            self.discard_subtree(child);
        }
        match &node.kind {
            NodeKind::Row(row) => {
                for splitter in &row.splitters {
                    self.nodes.remove(splitter);
                }
            }
            NodeKind::Border(border) => {
                if let Some(splitter) = &border.splitter {
                    self.nodes.remove(splitter);
                }
            }
            _ => {}
        }
        if self.active_tabset.as_ref() == Some(id) {
            self.active_tabset = None;
        }
        if self.maximized_tabset.as_ref() == Some(id) {
            self.maximized_tabset = None;
        }
        self.listeners.retain(|(owner, _), _| owner != id);
        self.dirty = true;
    }

    // ── Tidy ────────────────────────────────────────────────────────────

    /// Prune empty rows and deletable empty tabsets, hoist single-child rows,
    /// and give an empty root a fresh tabset.
    /// An empty tabset that is the root's only child stays.
    pub(crate) fn tidy(&mut self) {
        let root = self.root.clone();
        self.tidy_row(&root);
        if self.children(&root).is_empty() {
            let tabset = self.create_node(NodeKind::TabSet(TabSetNode::default()));
            self.insert_child(&root, &tabset, None);
            self.active_tabset = Some(tabset);
        }
    }

    fn tidy_row(&mut self, row: &NodeId) {
        let mut i = 0;
        while let Some(child) = self.children(row).get(i).cloned() {
            match self.node_type_of(&child) {
                Some(NodeType::Row) => {
                    self.tidy_row(&child);
                    let grandchildren = self.children(&child).to_vec();
                    match grandchildren.as_slice() {
                        [] => {
                            debug!(row = %child, "removing empty row");
                            self.detach(&child);
                            self.discard_subtree(&child);
                        }
                        [only] => {
                            self.hoist(row, i, &child, only);
                        }
                        _ => i += 1,
                    }
                }
                Some(NodeType::TabSet) if self.children(&child).is_empty() => {
                    let last = *row == self.root && self.children(row).len() == 1;
                    let deletable = !last
                        && self
                            .nodes
                            .get(&child)
                            .and_then(Node::as_tabset)
                            .is_some_and(|ts| self.tabset_delete_when_empty(ts));
                    if deletable {
                        debug!(tabset = %child, "removing empty tabset");
                        self.detach(&child);
                        self.discard_subtree(&child);
                    } else {
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }
    }

    /// Replace single-child `child` (at `index` in `row`) by its content.
    fn hoist(&mut self, row: &NodeId, index: usize, child: &NodeId, only: &NodeId) {
        let row_weight = self.weight_of(child);
        self.detach(child);
        self.detach(only);
        self.discard_subtree(child);
        if self.node_type_of(only) == Some(NodeType::Row) {
            // Same axis as `row`: splice the grandchildren in, scaled to the
            // weight the removed row held.
            let subs = self.children(only).to_vec();
            let total: f64 = subs.iter().map(|s| self.weight_of(s)).sum();
            for (j, sub) in subs.iter().enumerate() {
                let weight = if total > 0.0 {
                    row_weight * self.weight_of(sub) / total
                } else {
                    row_weight / subs.len() as f64
                };
                self.detach(sub);
                self.set_weight(sub, weight);
                self.insert_child(row, sub, Some(index + j));
            }
            self.discard_subtree(only);
        } else {
            self.set_weight(only, row_weight);
            self.insert_child(row, only, Some(index));
        }
        debug!(row = %row, hoisted = %only, "hoisted single-child row");
    }
}

/// Selection after removing `removed`, leaving `remaining` children.
pub(crate) fn selection_after_removal(
    selected: Option<usize>,
    removed: usize,
    remaining: usize,
) -> Option<usize> {
    if remaining == 0 {
        return None;
    }
    let next = match selected {
        None => 0,
        Some(s) if removed <= s => s.saturating_sub(1),
        Some(s) => s,
    };
    Some(next.min(remaining - 1))
}
