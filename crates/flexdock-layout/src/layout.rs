#![forbid(unsafe_code)]

//! The layout pass: borders, root row, tabsets.
//!
//! Every size along a split axis is an integer and the pieces of a split
//! always sum to the space being divided. Fractional shares are rounded with
//! the largest-remainder method: floor every share, then hand the leftover
//! pixels to the largest fractional parts (lower index wins ties).

use flexdock_core::geometry::{Orientation, Rect};

use crate::dock_location::DockLocation;
use crate::event::EventPayload;
use crate::logging::{debug_span, warn};
use crate::model::Model;
use crate::node::{Node, NodeId, NodeKind, NodeType, SplitterNode};

/// Round non-negative `targets` to integers summing exactly to `total`.
///
/// Deficits go to the largest remainders first; overflows are taken from
/// the largest values first. Ties resolve to the lower index.
#[must_use]
pub fn largest_remainder(targets: &[f64], total: i32) -> Vec<i32> {
    let total = total.max(0);
    if targets.is_empty() {
        return Vec::new();
    }
    let clean: Vec<f64> = targets
        .iter()
        .map(|t| if t.is_finite() { t.max(0.0) } else { 0.0 })
        .collect();
    let mut out: Vec<i32> = clean.iter().map(|t| t.floor() as i32).collect();
    let mut deficit = total - out.iter().sum::<i32>();

    if deficit > 0 {
        let mut order: Vec<usize> = (0..clean.len()).collect();
        order.sort_by(|&a, &b| {
            let ra = clean[a] - clean[a].floor();
            let rb = clean[b] - clean[b].floor();
            rb.total_cmp(&ra).then(a.cmp(&b))
        });
        let mut i = 0;
        while deficit > 0 {
            out[order[i % order.len()]] += 1;
            deficit -= 1;
            i += 1;
        }
    } else {
        while deficit < 0 {
            let Some(largest) = (0..out.len())
                .filter(|&i| out[i] > 0)
                .max_by(|&a, &b| out[a].cmp(&out[b]).then(b.cmp(&a)))
            else {
                break;
            };
            out[largest] -= 1;
            deficit += 1;
        }
    }
    out
}

/// Split `total` by `weights`, never giving an entry less than its minimum.
///
/// Entries whose proportional share falls under their minimum are locked at
/// the minimum and the rest is redistributed. Minimums that cannot all fit
/// are ignored. A zero weight sum splits equally.
#[must_use]
pub fn distribute_weighted(weights: &[f64], mins: &[i32], total: i32) -> Vec<i32> {
    let n = weights.len();
    let total = total.max(0);
    if n == 0 {
        return Vec::new();
    }
    let mins: Vec<i32> = (0..n)
        .map(|i| mins.get(i).copied().unwrap_or(0).max(0))
        .collect();
    let mins_fit = mins.iter().map(|&m| i64::from(m)).sum::<i64>() <= i64::from(total);

    let mut locked: Vec<Option<i32>> = vec![None; n];
    loop {
        let free: Vec<usize> = (0..n).filter(|&i| locked[i].is_none()).collect();
        if free.is_empty() {
            break;
        }
        let remaining = total - locked.iter().flatten().sum::<i32>();
        let targets = proportional_targets(weights, &free, remaining);
        let mut changed = false;
        if mins_fit {
            for (k, &i) in free.iter().enumerate() {
                if targets[k] < f64::from(mins[i]) {
                    locked[i] = Some(mins[i]);
                    changed = true;
                }
            }
        }
        if !changed {
            let sizes = largest_remainder(&targets, remaining);
            for (k, &i) in free.iter().enumerate() {
                locked[i] = Some(sizes[k]);
            }
            break;
        }
    }
    locked.into_iter().map(|s| s.unwrap_or(0)).collect()
}

fn proportional_targets(weights: &[f64], subset: &[usize], total: i32) -> Vec<f64> {
    let sum: f64 = subset.iter().map(|&i| weights[i].max(0.0)).sum();
    let total = f64::from(total.max(0));
    subset
        .iter()
        .map(|&i| {
            if sum > 0.0 {
                total * weights[i].max(0.0) / sum
            } else {
                total / subset.len() as f64
            }
        })
        .collect()
}

/// Cut `extent` pixels into `count` near-equal pieces.
fn equal_pieces(count: usize, extent: i32) -> Vec<i32> {
    largest_remainder(&vec![f64::from(extent.max(0)) / count.max(1) as f64; count], extent)
}

fn axis_rect(rect: Rect, orientation: Orientation, start: i32, size: i32) -> Rect {
    match orientation {
        Orientation::Horz => Rect::new(start, rect.y, size, rect.height),
        Orientation::Vert => Rect::new(rect.x, start, rect.width, size),
    }
}

pub(crate) fn axis_start(rect: Rect, orientation: Orientation) -> i32 {
    match orientation {
        Orientation::Horz => rect.x,
        Orientation::Vert => rect.y,
    }
}

pub(crate) fn axis_end(rect: Rect, orientation: Orientation) -> i32 {
    match orientation {
        Orientation::Horz => rect.right(),
        Orientation::Vert => rect.bottom(),
    }
}

impl Model {
    /// Lay out the whole model into `rect`, returning the center rectangle
    /// left for the root row once borders and margins are taken out.
    pub fn layout(&mut self, rect: Rect) -> Rect {
        let _span = debug_span!("layout_pass", w = rect.width, h = rect.height).entered();
        self.layout_rect = Some(rect);
        let inner = self.layout_borders(rect);
        let center = inner.remove_insets(self.config.margin_insets);
        let root = self.root.clone();
        self.layout_row(&root, center);
        self.dirty = false;
        center
    }

    /// Re-run layout against the last rectangle, if any.
    pub fn relayout(&mut self) -> Option<Rect> {
        let rect = self.layout_rect?;
        Some(self.layout(rect))
    }

    /// Rectangle of the root row from the last layout pass.
    #[must_use]
    pub fn center_rect(&self) -> Rect {
        self.nodes.get(&self.root).map_or(Rect::empty(), Node::rect)
    }

    pub(crate) fn set_rect(&mut self, id: &NodeId, rect: Rect) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let changed = node.rect != rect;
        node.rect = rect;
        if changed && node.node_type() == NodeType::Tab {
            self.emit(id, EventPayload::Resize { rect });
        }
    }

    pub(crate) fn set_visible(&mut self, id: &NodeId, visible: bool) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let changed = node.visible != visible;
        node.visible = visible;
        if changed && node.node_type() == NodeType::Tab {
            self.emit(id, EventPayload::Visibility { visible });
        }
    }

    // ── Rows ────────────────────────────────────────────────────────────

    fn layout_row(&mut self, id: &NodeId, rect: Rect) {
        self.set_rect(id, rect);
        let orientation = self.row_orientation(id);
        let children = self.children(id).to_vec();
        let splitters = self.reconcile_splitters(id, children.len().saturating_sub(1), orientation);

        let splitter_size = self.config.splitter_size.max(0);
        let extent = rect.size(orientation);
        let splitter_count = i32::try_from(splitters.len()).unwrap_or(i32::MAX);
        let available = extent
            .saturating_sub(splitter_size.saturating_mul(splitter_count))
            .max(0);
        let sizes = self.row_child_sizes(&children, orientation, available);

        // Splitters that do not fit are cut off at the row's far edge.
        let end = axis_end(rect, orientation);
        let mut pos = axis_start(rect, orientation);
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                if let Some(splitter) = splitters.get(i - 1) {
                    let thickness = splitter_size.min((end - pos).max(0));
                    self.set_rect(splitter, axis_rect(rect, orientation, pos, thickness));
                    self.set_visible(splitter, true);
                    pos += thickness;
                }
            }
            let size = sizes.get(i).copied().unwrap_or(0);
            let child_rect = axis_rect(rect, orientation, pos, size);
            pos += size;
            match self.node_type_of(child) {
                Some(NodeType::Row) => self.layout_row(child, child_rect),
                Some(NodeType::TabSet) => self.layout_tabset(child, child_rect),
                _ => self.set_rect(child, child_rect),
            }
        }
    }

    /// Keep exactly `count` splitters on the row, reusing existing ids.
    fn reconcile_splitters(&mut self, row: &NodeId, count: usize, axis: Orientation) -> Vec<NodeId> {
        let mut splitters = self
            .nodes
            .get(row)
            .and_then(Node::as_row)
            .map(|r| r.splitters.clone())
            .unwrap_or_default();
        for extra in splitters.split_off(count.min(splitters.len())) {
            self.nodes.remove(&extra);
        }
        while splitters.len() < count {
            let splitter = self.create_node(NodeKind::Splitter(SplitterNode { axis }));
            if let Some(node) = self.nodes.get_mut(&splitter) {
                node.parent = Some(row.clone());
            }
            splitters.push(splitter);
        }
        for splitter in &splitters {
            if let Some(NodeKind::Splitter(s)) = self.nodes.get_mut(splitter).map(|n| &mut n.kind) {
                s.axis = axis;
            }
        }
        if let Some(r) = self.nodes.get_mut(row).and_then(Node::as_row_mut) {
            r.splitters.clone_from(&splitters);
        }
        splitters
    }

    /// Sizes of row children along `orientation`, summing to `available`.
    ///
    /// Explicit sizes are honored while they fit and weighted children share
    /// the rest. When every child is explicitly sized the sizes are scaled to
    /// fill; when explicit sizes overflow, everything falls back to weights.
    fn row_child_sizes(&self, children: &[NodeId], orientation: Orientation, available: i32) -> Vec<i32> {
        let prefs: Vec<Option<i32>> = children
            .iter()
            .map(|c| self.nodes.get(c).and_then(|n| n.pref_size(orientation)).map(|p| p.max(0)))
            .collect();
        let weights: Vec<f64> = children.iter().map(|c| self.weight_of(c)).collect();
        let mins: Vec<i32> = children.iter().map(|c| self.min_size(c, orientation)).collect();

        if !prefs.is_empty() && prefs.iter().all(Option::is_some) {
            let fixed: Vec<f64> = prefs.iter().map(|p| f64::from(p.unwrap_or(0))).collect();
            let all: Vec<usize> = (0..fixed.len()).collect();
            return largest_remainder(&proportional_targets(&fixed, &all, available), available);
        }

        let fixed_sum: i64 = prefs.iter().flatten().map(|&p| i64::from(p)).sum();
        if fixed_sum > i64::from(available) {
            return distribute_weighted(&weights, &mins, available);
        }

        let variable: Vec<usize> = (0..children.len()).filter(|&i| prefs[i].is_none()).collect();
        let var_weights: Vec<f64> = variable.iter().map(|&i| weights[i]).collect();
        let var_mins: Vec<i32> = variable.iter().map(|&i| mins[i]).collect();
        let rest = available - fixed_sum as i32;
        let var_sizes = distribute_weighted(&var_weights, &var_mins, rest);

        let mut sizes: Vec<i32> = prefs.iter().map(|p| p.unwrap_or(0)).collect();
        for (k, &i) in variable.iter().enumerate() {
            sizes[i] = var_sizes[k];
        }
        sizes
    }

    // ── Tabsets ─────────────────────────────────────────────────────────

    fn layout_tabset(&mut self, id: &NodeId, rect: Rect) {
        let rect = if self.maximized_tabset.as_ref() == Some(id) {
            self.center_rect()
        } else {
            rect
        };
        let Some(ts) = self.nodes.get(id).and_then(Node::as_tabset) else {
            return;
        };
        let outer = rect.remove_insets(self.tabset_margin_insets(ts));
        let mut inner = outer.remove_insets(self.tabset_border_insets(ts));

        let header_rect = if ts.name.is_some() {
            let (header, rest) = DockLocation::Top.split(inner, self.tabset_header_height(ts).min(inner.height));
            inner = rest;
            Some(header)
        } else {
            None
        };
        let tab_strip_rect = if self.tabset_tab_strip_enabled(ts) {
            let (strip, rest) = DockLocation::Top.split(inner, self.tabset_tab_strip_height(ts).min(inner.height));
            inner = rest;
            Some(strip)
        } else {
            None
        };
        let content = inner;
        let selected = ts.selected;

        self.set_rect(id, outer);
        if let Some(ts) = self.nodes.get_mut(id).and_then(Node::as_tabset_mut) {
            ts.header_rect = header_rect;
            ts.tab_strip_rect = tab_strip_rect;
            ts.content_rect = content;
        }

        let children = self.children(id).to_vec();
        if let Some(s) = selected {
            if s >= children.len() {
                warn!(tabset = %id, selected = s, children = children.len(), "selected index has no tab");
            }
        }
        let header = tab_strip_rect.or(header_rect);
        let widths = header.map(|h| equal_pieces(children.len(), h.width));
        let mut x = header.map_or(0, |h| h.x);
        for (i, child) in children.iter().enumerate() {
            let tab_rect = match (header, &widths) {
                (Some(h), Some(widths)) => {
                    let r = Rect::new(x, h.y, widths[i], h.height);
                    x += widths[i];
                    r
                }
                _ => Rect::empty(),
            };
            if let Some(tab) = self.nodes.get_mut(child).and_then(Node::as_tab_mut) {
                tab.tab_rect = tab_rect;
            }
            let visible = selected == Some(i);
            self.set_visible(child, visible);
            if visible {
                self.set_rect(child, content);
            }
        }
    }

    // ── Borders ─────────────────────────────────────────────────────────

    /// Lay out border bars and open panels, returning what is left inside.
    fn layout_borders(&mut self, rect: Rect) -> Rect {
        let splitter_size = self.config.splitter_size.max(0);
        let borders = self.borders.clone();
        let (showing, hidden): (Vec<NodeId>, Vec<NodeId>) =
            borders.into_iter().partition(|b| self.border_showing(b));

        for border in &hidden {
            self.hide_border(border);
        }

        let mut outer = rect;
        for border in &showing {
            let Some(b) = self.nodes.get(border).and_then(Node::as_border) else {
                continue;
            };
            let location = b.location;
            let bar = self.border_bar_size(b).min(outer.size(location.orientation()).max(0));
            let (bar_rect, rest) = location.split(outer, bar);
            outer = rest;
            self.set_rect(border, bar_rect);
            if let Some(b) = self.nodes.get_mut(border).and_then(Node::as_border_mut) {
                b.tab_header_rect = bar_rect;
            }
        }

        let sizes = self.border_panel_sizes(&showing, outer, splitter_size);
        let mut inner = outer;
        for (border, size) in showing.iter().zip(sizes) {
            let Some(b) = self.nodes.get(border).and_then(Node::as_border) else {
                continue;
            };
            let location = b.location;
            let open = b.is_open();
            let selected = b.selected;
            let bar_rect = b.tab_header_rect;

            let content = if let Some(size) = size {
                let axis = location.orientation();
                let total = size.saturating_add(splitter_size).min(inner.size(axis).max(0));
                let (panel, rest) = location.split(inner, total);
                inner = rest;
                let (splitter_rect, content) =
                    location.reflect().split(panel, splitter_size.min(panel.size(axis)));
                let splitter = self.border_splitter(border, axis);
                self.set_rect(&splitter, splitter_rect);
                self.set_visible(&splitter, true);
                content
            } else {
                if let Some(splitter) = self.nodes.get(border).and_then(Node::as_border).and_then(|b| b.splitter.clone()) {
                    self.set_rect(&splitter, Rect::empty());
                    self.set_visible(&splitter, false);
                }
                Rect::empty()
            };
            if let Some(b) = self.nodes.get_mut(border).and_then(Node::as_border_mut) {
                b.content_rect = content;
                b.adjusted_size = size.unwrap_or(b.size);
            }

            let children = self.children(border).to_vec();
            let along = match location.orientation() {
                Orientation::Vert => Orientation::Horz,
                Orientation::Horz => Orientation::Vert,
            };
            let pieces = equal_pieces(children.len(), bar_rect.size(along));
            let mut pos = axis_start(bar_rect, along);
            for (i, child) in children.iter().enumerate() {
                let tab_rect = axis_rect(bar_rect, along, pos, pieces[i]);
                pos += pieces[i];
                if let Some(tab) = self.nodes.get_mut(child).and_then(Node::as_tab_mut) {
                    tab.tab_rect = tab_rect;
                }
                let visible = open && selected == Some(i);
                self.set_visible(child, visible);
                if visible {
                    self.set_rect(child, content);
                }
            }
        }

        self.border_outer = outer;
        self.border_inner = inner;
        inner
    }

    /// Panel sizes for showing borders; `None` for closed ones.
    ///
    /// Open panels on the same axis shrink round-robin until they and their
    /// splitters fit inside `outer`.
    fn border_panel_sizes(&self, showing: &[NodeId], outer: Rect, splitter_size: i32) -> Vec<Option<i32>> {
        let mut sizes: Vec<Option<i32>> = showing
            .iter()
            .map(|id| {
                let b = self.nodes.get(id).and_then(Node::as_border)?;
                b.is_open().then(|| b.size.max(self.border_min_size(b)))
            })
            .collect();

        for axis in [Orientation::Horz, Orientation::Vert] {
            let on_axis: Vec<usize> = (0..showing.len())
                .filter(|&i| {
                    sizes[i].is_some()
                        && self
                            .nodes
                            .get(&showing[i])
                            .and_then(Node::as_border)
                            .is_some_and(|b| b.location.orientation() == axis)
                })
                .collect();
            let needed: i64 = on_axis
                .iter()
                .map(|&i| i64::from(sizes[i].unwrap_or(0)) + i64::from(splitter_size))
                .sum();
            let mut excess = needed - i64::from(outer.size(axis).max(0));
            while excess > 0 {
                let shrinkable: Vec<usize> = on_axis
                    .iter()
                    .copied()
                    .filter(|&i| sizes[i].unwrap_or(0) > 0)
                    .collect();
                if shrinkable.is_empty() {
                    break;
                }
                let share = (excess / shrinkable.len() as i64).max(1);
                for i in shrinkable {
                    if let Some(size) = sizes[i].as_mut() {
                        let cut = share.min(i64::from(*size)).min(excess);
                        *size -= i32::try_from(cut).unwrap_or(*size);
                        excess -= cut;
                    }
                }
            }
        }
        sizes
    }

    fn border_splitter(&mut self, border: &NodeId, axis: Orientation) -> NodeId {
        if let Some(existing) = self.nodes.get(border).and_then(Node::as_border).and_then(|b| b.splitter.clone()) {
            return existing;
        }
        let splitter = self.create_node(NodeKind::Splitter(SplitterNode { axis }));
        if let Some(node) = self.nodes.get_mut(&splitter) {
            node.parent = Some(border.clone());
        }
        if let Some(b) = self.nodes.get_mut(border).and_then(Node::as_border_mut) {
            b.splitter = Some(splitter.clone());
        }
        splitter
    }

    fn hide_border(&mut self, border: &NodeId) {
        self.set_rect(border, Rect::empty());
        let splitter = match self.nodes.get_mut(border).and_then(Node::as_border_mut) {
            Some(b) => {
                b.tab_header_rect = Rect::empty();
                b.content_rect = Rect::empty();
                b.splitter.clone()
            }
            None => None,
        };
        if let Some(splitter) = splitter {
            self.set_rect(&splitter, Rect::empty());
            self.set_visible(&splitter, false);
        }
        for child in self.children(border).to_vec() {
            if let Some(tab) = self.nodes.get_mut(&child).and_then(Node::as_tab_mut) {
                tab.tab_rect = Rect::empty();
            }
            self.set_visible(&child, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn largest_remainder_sums_exactly() {
        assert_eq!(largest_remainder(&[333.3, 333.3, 333.4], 1000), vec![333, 333, 334]);
        assert_eq!(largest_remainder(&[0.5, 0.5, 0.5], 2), vec![1, 1, 0]);
        assert_eq!(largest_remainder(&[10.0, 10.0], 18), vec![9, 9]);
        assert_eq!(largest_remainder(&[], 10), Vec::<i32>::new());
    }

    #[test]
    fn distribute_honors_minimums() {
        let sizes = distribute_weighted(&[90.0, 10.0], &[0, 300], 1000);
        assert_eq!(sizes, vec![700, 300]);
        let sizes = distribute_weighted(&[1.0, 1.0], &[800, 800], 1000);
        assert_eq!(sizes, vec![500, 500]);
        let sizes = distribute_weighted(&[0.0, 0.0, 0.0], &[], 10);
        assert_eq!(sizes.iter().sum::<i32>(), 10);
    }

    fn two_tabsets() -> Model {
        Model::from_json(&json!({
            "layout": {"type": "row", "children": [
                {"type": "tabset", "id": "left", "weight": 50, "children": [{"type": "tab", "id": "fx", "name": "FX"}]},
                {"type": "tabset", "id": "right", "weight": 50, "children": [{"type": "tab", "id": "fi", "name": "FI"}]}
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn row_splits_around_splitter() {
        let mut model = two_tabsets();
        let center = model.layout(Rect::new(0, 0, 1000, 500));
        assert_eq!(center, Rect::new(0, 0, 1000, 500));
        assert_eq!(model.node("left").unwrap().rect(), Rect::new(0, 0, 496, 500));
        assert_eq!(model.node("right").unwrap().rect(), Rect::new(504, 0, 496, 500));

        let draw = model.draw_children(model.root());
        assert_eq!(draw.len(), 3);
        let splitter = model.node(&draw[1]).unwrap();
        assert_eq!(splitter.rect(), Rect::new(496, 0, 8, 500));
        assert_eq!(splitter.as_splitter().unwrap().axis(), Orientation::Horz);
        assert!(!model.is_dirty());
    }

    #[test]
    fn tabset_carves_strip_and_shows_selected_tab() {
        let mut model = two_tabsets();
        model.layout(Rect::new(0, 0, 1000, 500));
        let ts = model.node("left").unwrap().as_tabset().unwrap();
        assert_eq!(ts.tab_strip_rect(), Some(Rect::new(0, 0, 496, 20)));
        assert_eq!(ts.content_rect(), Rect::new(0, 20, 496, 480));
        let tab = model.node("fx").unwrap();
        assert!(tab.is_visible());
        assert_eq!(tab.rect(), Rect::new(0, 20, 496, 480));
        assert_eq!(tab.as_tab().unwrap().tab_rect(), Rect::new(0, 0, 496, 20));
    }

    #[test]
    fn explicit_width_is_honored() {
        let mut model = Model::from_json(&json!({
            "layout": {"type": "row", "children": [
                {"type": "tabset", "id": "fixed", "width": 200, "children": [{"type": "tab"}]},
                {"type": "tabset", "id": "a", "children": [{"type": "tab"}]},
                {"type": "tabset", "id": "b", "children": [{"type": "tab"}]}
            ]}
        }))
        .unwrap();
        model.layout(Rect::new(0, 0, 1016, 300));
        assert_eq!(model.node("fixed").unwrap().rect().width, 200);
        assert_eq!(model.node("a").unwrap().rect().width, 400);
        assert_eq!(model.node("b").unwrap().rect().width, 400);
    }

    #[test]
    fn nested_row_runs_vertically() {
        let mut model = Model::from_json(&json!({
            "layout": {"type": "row", "children": [
                {"type": "tabset", "id": "side", "children": [{"type": "tab"}]},
                {"type": "row", "id": "col", "children": [
                    {"type": "tabset", "id": "top", "children": [{"type": "tab"}]},
                    {"type": "tabset", "id": "bottom", "children": [{"type": "tab"}]}
                ]}
            ]}
        }))
        .unwrap();
        model.layout(Rect::new(0, 0, 808, 408));
        assert_eq!(model.node("col").unwrap().rect(), Rect::new(408, 0, 400, 408));
        assert_eq!(model.node("top").unwrap().rect(), Rect::new(408, 0, 400, 200));
        assert_eq!(model.node("bottom").unwrap().rect(), Rect::new(408, 208, 400, 200));
    }

    #[test]
    fn open_border_takes_panel_and_splitter() {
        let mut model = Model::from_json(&json!({
            "borders": [{"type": "border", "location": "left", "id": "lb", "selected": 0,
                         "children": [{"type": "tab", "id": "files"}]}],
            "layout": {"type": "row", "children": [{"type": "tabset", "children": [{"type": "tab"}]}]}
        }))
        .unwrap();
        let center = model.layout(Rect::new(0, 0, 1000, 500));
        let border = model.node("lb").unwrap().as_border().unwrap();
        assert_eq!(border.tab_header_rect(), Rect::new(0, 0, 25, 500));
        assert_eq!(border.content_rect(), Rect::new(25, 0, 200, 500));
        let splitter = model.node(border.splitter().unwrap()).unwrap();
        assert_eq!(splitter.rect(), Rect::new(225, 0, 8, 500));
        assert_eq!(center, Rect::new(233, 0, 767, 500));
        assert!(model.node("files").unwrap().is_visible());
    }

    #[test]
    fn oversized_borders_shrink_to_fit() {
        let mut model = Model::from_json(&json!({
            "borders": [
                {"type": "border", "location": "left", "id": "l", "selected": 0, "size": 600,
                 "children": [{"type": "tab"}]},
                {"type": "border", "location": "right", "id": "r", "selected": 0, "size": 600,
                 "children": [{"type": "tab"}]}
            ],
            "layout": {"type": "row", "children": []}
        }))
        .unwrap();
        let center = model.layout(Rect::new(0, 0, 1000, 500));
        let l = model.node("l").unwrap().as_border().unwrap().adjusted_size();
        let r = model.node("r").unwrap().as_border().unwrap().adjusted_size();
        assert_eq!(l + r + 16 + 50, 1000);
        assert_eq!(center.width, 0);
    }

    #[test]
    fn huge_splitters_stay_inside_row() {
        let mut model = Model::from_json(&json!({
            "global": {"splitterSize": 2_000_000_000},
            "layout": {"type": "row", "children": [
                {"type": "tabset", "id": "a", "children": [{"type": "tab"}]},
                {"type": "tabset", "id": "b", "children": [{"type": "tab"}]},
                {"type": "tabset", "id": "c", "children": [{"type": "tab"}]}
            ]}
        }))
        .unwrap();
        let center = model.layout(Rect::new(0, 0, 1000, 500));
        assert_eq!(center, Rect::new(0, 0, 1000, 500));
        for id in ["a", "b", "c"] {
            assert_eq!(model.node(id).unwrap().rect().width, 0);
        }
        for id in model.draw_children(model.root()) {
            let rect = model.node(&id).unwrap().rect();
            assert!(rect.x >= 0 && rect.width >= 0 && rect.x + rect.width <= 1000, "{id}: {rect:?}");
        }
        let splitter = model.draw_children(model.root())[1].clone();
        assert!(model.split_action(&splitter, 500).is_some());
    }

    #[test]
    fn huge_border_size_clamps_to_layout() {
        let mut model = Model::from_json(&json!({
            "borders": [{"type": "border", "location": "left", "id": "lb", "selected": 0,
                         "size": i32::MAX, "children": [{"type": "tab"}]}],
            "layout": {"type": "row", "children": [{"type": "tabset", "children": [{"type": "tab"}]}]}
        }))
        .unwrap();
        let center = model.layout(Rect::new(0, 0, 1000, 500));
        assert!(center.width >= 0 && center.x + center.width <= 1000);
        let border = model.node("lb").unwrap().as_border().unwrap();
        let content = border.content_rect();
        assert!(content.width >= 0 && content.x + content.width <= 1000);
        let splitter = border.splitter().unwrap().clone();
        assert!(model.split_action(&splitter, 900).is_some());
    }

    #[test]
    fn closed_border_keeps_only_bar() {
        let mut model = Model::from_json(&json!({
            "borders": [{"type": "border", "location": "bottom", "id": "bb",
                         "children": [{"type": "tab", "id": "t1"}, {"type": "tab", "id": "t2"}]}],
            "layout": {"type": "row", "children": []}
        }))
        .unwrap();
        let center = model.layout(Rect::new(0, 0, 600, 400));
        assert_eq!(center, Rect::new(0, 0, 600, 375));
        let t2 = model.node("t2").unwrap();
        assert!(!t2.is_visible());
        assert_eq!(t2.as_tab().unwrap().tab_rect(), Rect::new(300, 375, 300, 25));
    }

    #[test]
    fn maximized_tabset_fills_root() {
        let mut model = Model::from_json(&json!({
            "layout": {"type": "row", "children": [
                {"type": "tabset", "id": "a", "children": [{"type": "tab"}]},
                {"type": "tabset", "id": "b", "maximized": true, "children": [{"type": "tab"}]}
            ]}
        }))
        .unwrap();
        model.layout(Rect::new(0, 0, 800, 600));
        assert_eq!(model.node("b").unwrap().rect(), Rect::new(0, 0, 800, 600));
    }
}
