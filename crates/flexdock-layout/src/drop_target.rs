#![forbid(unsafe_code)]

//! Drop-target resolution for drags in progress.
//!
//! A probe walks the laid-out tree depth-first. A node takes part only when
//! its rectangle holds the pointer, a node's own offer wins over its
//! children, and the first accepted offer ends the search.

use flexdock_core::geometry::{Orientation, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dock_location::DockLocation;
use crate::model::Model;
use crate::node::{Node, NodeId, NodeType};

/// Width of the root row's edge-dock band.
const EDGE_DOCK_MARGIN: i32 = 10;
/// Half-length of the edge-dock window centered on each edge.
const EDGE_DOCK_HALF_WINDOW: i32 = 50;

/// How the renderer should paint the drop outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlineKind {
    /// Outline over a tabset, border or tab-strip insertion point.
    Rect,
    /// Outline for docking against the edge of the root row.
    Edge,
}

/// A candidate drop: where the dragged item would land and what to paint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropInfo {
    pub node: NodeId,
    pub rect: Rect,
    pub location: DockLocation,
    /// Insertion index among the target's tabs; `None` appends.
    pub index: Option<usize>,
    pub outline: OutlineKind,
}

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragItem {
    /// A tab or tabset already in the model.
    Existing { id: NodeId },
    /// A tab that does not exist yet, described by its JSON.
    NewTab { json: Value },
}

impl DragItem {
    pub fn existing(id: impl Into<NodeId>) -> Self {
        Self::Existing { id: id.into() }
    }

    #[must_use]
    pub fn new_tab(json: Value) -> Self {
        Self::NewTab { json }
    }

    #[must_use]
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::Existing { id } => Some(id),
            Self::NewTab { .. } => None,
        }
    }

    fn is(&self, id: &NodeId) -> bool {
        self.node_id() == Some(id)
    }
}

/// Host policy consulted after the built-in drop rules accept a candidate.
pub(crate) type AllowDropCallback = Box<dyn Fn(&DragItem, &DropInfo) -> bool>;

impl Model {
    /// Install a host policy deciding whether a drop may happen.
    pub fn set_allow_drop(&mut self, allow: impl Fn(&DragItem, &DropInfo) -> bool + 'static) {
        self.allow_drop = Some(Box::new(allow));
    }

    pub fn clear_allow_drop(&mut self) {
        self.allow_drop = None;
    }

    /// Resolve where `item` would land if released at `(x, y)`.
    ///
    /// While a tabset is maximized it is the only target inside the root
    /// rectangle and borders take no drops.
    #[must_use]
    pub fn find_drop_target(&self, item: &DragItem, x: i32, y: i32) -> Option<DropInfo> {
        let root_rect = self.center_rect();
        if let Some(maximized) = &self.maximized_tabset {
            if root_rect.contains(x, y) {
                return self.tabset_can_drop(item, maximized, x, y);
            }
            return None;
        }
        if let Some(info) = self.find_in(&self.root, item, x, y) {
            return Some(info);
        }
        self.borders
            .iter()
            .filter(|b| self.border_showing(b))
            .find_map(|b| self.border_can_drop(item, b, x, y))
    }

    fn find_in(&self, id: &NodeId, item: &DragItem, x: i32, y: i32) -> Option<DropInfo> {
        let node = self.nodes.get(id)?;
        if !node.rect.contains(x, y) {
            return None;
        }
        match node.node_type() {
            NodeType::Row => self
                .row_can_drop(item, id, x, y)
                .or_else(|| node.children.iter().find_map(|c| self.find_in(c, item, x, y))),
            NodeType::TabSet => self.tabset_can_drop(item, id, x, y),
            _ => None,
        }
    }

    /// Policy gate applied to every candidate.
    ///
    /// Center drops need the target to accept drops, edge drops need it to
    /// allow dividing, and a named tabset never merges into another tabset.
    #[must_use]
    pub fn can_dock_into(&self, item: &DragItem, info: &DropInfo) -> bool {
        if info.location == DockLocation::Center {
            if !self.is_drop_enabled(&info.node) {
                return false;
            }
            let named_tabset = item
                .node_id()
                .and_then(|id| self.nodes.get(id))
                .and_then(Node::as_tabset)
                .is_some_and(|ts| ts.name.is_some());
            if named_tabset && self.node_type_of(&info.node) == Some(NodeType::TabSet) {
                return false;
            }
        } else if !self.is_divide_enabled(&info.node) {
            return false;
        }
        self.allow_drop.as_ref().is_none_or(|allow| allow(item, info))
    }

    fn accept(&self, item: &DragItem, info: DropInfo) -> Option<DropInfo> {
        self.can_dock_into(item, &info).then_some(info)
    }

    fn tabset_can_drop(&self, item: &DragItem, id: &NodeId, x: i32, y: i32) -> Option<DropInfo> {
        let node = self.nodes.get(id)?;
        let ts = node.as_tabset()?;
        let info = if item.is(id) {
            DropInfo {
                node: id.clone(),
                rect: ts.tab_header_rect().unwrap_or(node.rect),
                location: DockLocation::Center,
                index: None,
                outline: OutlineKind::Rect,
            }
        } else if ts.content_rect.contains(x, y) {
            let location = DockLocation::from_point(ts.content_rect, x, y);
            DropInfo {
                node: id.clone(),
                rect: location.dock_rect(node.rect),
                location,
                index: None,
                outline: OutlineKind::Rect,
            }
        } else {
            let header = ts.tab_header_rect().filter(|h| h.contains(x, y))?;
            let (rect, index) = self.strip_insertion(&node.children, header, Orientation::Horz, x);
            DropInfo {
                node: id.clone(),
                rect,
                location: DockLocation::Center,
                index: Some(index),
                outline: OutlineKind::Rect,
            }
        };
        self.accept(item, info)
    }

    /// Insertion point in a strip of tab buttons laid along `along`.
    ///
    /// The pointer lands before the first tab whose midpoint it has not
    /// reached; past every midpoint it appends.
    fn strip_insertion(&self, tabs: &[NodeId], strip: Rect, along: Orientation, pos: i32) -> (Rect, usize) {
        let tab_rects: Vec<Rect> = tabs
            .iter()
            .map(|t| self.nodes.get(t).and_then(Node::as_tab).map_or(Rect::empty(), |tab| tab.tab_rect))
            .collect();
        let marker = |at: i32| match along {
            Orientation::Horz => Rect::new(at - 2, strip.y, 3, strip.height),
            Orientation::Vert => Rect::new(strip.x, at - 2, strip.width, 3),
        };
        // (start, end, midpoint) along the strip
        let span = |r: &Rect| match along {
            Orientation::Horz => (r.x, r.right(), r.center_x()),
            Orientation::Vert => (r.y, r.bottom(), r.center_y()),
        };
        let mut p = span(&strip).0;
        let Some(last) = tab_rects.last() else {
            return (marker(p + 2), 0);
        };
        for (i, r) in tab_rects.iter().enumerate() {
            let (start, _, mid) = span(r);
            if pos >= p && pos < mid {
                return (marker(start), i);
            }
            p = mid;
        }
        (marker(span(last).1), tab_rects.len())
    }

    fn border_can_drop(&self, item: &DragItem, id: &NodeId, x: i32, y: i32) -> Option<DropInfo> {
        let carries_tab = match item {
            DragItem::Existing { id } => self.node_type_of(id) == Some(NodeType::Tab),
            DragItem::NewTab { .. } => true,
        };
        if !carries_tab {
            return None;
        }
        let node = self.nodes.get(id)?;
        let border = node.as_border()?;
        let bar = border.tab_header_rect;
        let info = if bar.contains(x, y) {
            let (along, pos) = match border.location.orientation() {
                Orientation::Vert => (Orientation::Horz, x),
                Orientation::Horz => (Orientation::Vert, y),
            };
            let (rect, index) = self.strip_insertion(&node.children, bar, along, pos);
            DropInfo {
                node: id.clone(),
                rect,
                location: DockLocation::Center,
                index: Some(index),
                outline: OutlineKind::Rect,
            }
        } else if border.is_open() && border.content_rect.contains(x, y) {
            DropInfo {
                node: id.clone(),
                rect: border.content_rect,
                location: DockLocation::Center,
                index: None,
                outline: OutlineKind::Rect,
            }
        } else {
            return None;
        };
        self.accept(item, info)
    }

    /// Edge docking on the root row: a thin band along each edge, limited to
    /// a window around the edge's midpoint.
    fn row_can_drop(&self, item: &DragItem, id: &NodeId, x: i32, y: i32) -> Option<DropInfo> {
        if *id != self.root || !self.config.enable_edge_dock {
            return None;
        }
        let r = self.nodes.get(id)?.rect;
        let near_mid_y = (y - r.center_y()).abs() < EDGE_DOCK_HALF_WINDOW;
        let near_mid_x = (x - r.center_x()).abs() < EDGE_DOCK_HALF_WINDOW;
        let location = if x < r.x + EDGE_DOCK_MARGIN && near_mid_y {
            DockLocation::Left
        } else if x >= r.right() - EDGE_DOCK_MARGIN && near_mid_y {
            DockLocation::Right
        } else if y < r.y + EDGE_DOCK_MARGIN && near_mid_x {
            DockLocation::Top
        } else if y >= r.bottom() - EDGE_DOCK_MARGIN && near_mid_x {
            DockLocation::Bottom
        } else {
            return None;
        };
        let half = location.dock_rect(r);
        let rect = match location {
            DockLocation::Left => Rect::new(half.x, half.y, half.width / 2, half.height),
            DockLocation::Right => Rect::new(half.x + half.width / 2, half.y, half.width / 2, half.height),
            DockLocation::Top => Rect::new(half.x, half.y, half.width, half.height / 2),
            DockLocation::Bottom | DockLocation::Center => {
                Rect::new(half.x, half.y + half.height / 2, half.width, half.height / 2)
            }
        };
        self.accept(
            item,
            DropInfo {
                node: id.clone(),
                rect,
                location,
                index: None,
                outline: OutlineKind::Edge,
            },
        )
    }
}
