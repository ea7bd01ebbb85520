#![forbid(unsafe_code)]

//! [`DragHandler`]s that turn pointer gestures into model actions.
//!
//! Controllers share the model with the host through `Rc<RefCell<Model>>`
//! and publish what the renderer should paint while a drag is in flight
//! through an [`Outline`] handle.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use flexdock_core::geometry::{Orientation, Rect};
use flexdock_core::pointer::PointerPosition;

use crate::action::{Action, ActionOutcome};
use crate::drag::DragHandler;
use crate::drop_target::{DragItem, DropInfo};
use crate::layout::axis_start;
use crate::logging::debug;
use crate::model::Model;
use crate::node::{NodeId, NodeType};

/// A model shared between the host and its controllers.
pub type SharedModel = Rc<RefCell<Model>>;

/// Shared slot holding the current drag feedback.
pub struct Outline<T>(Rc<RefCell<Option<T>>>);

impl<T> Outline<T> {
    fn set(&self, value: Option<T>) {
        *self.0.borrow_mut() = value;
    }

    fn take(&self) -> Option<T> {
        self.0.borrow_mut().take()
    }
}

impl<T: Clone> Outline<T> {
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Outline<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for Outline<T> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }
}

impl<T: fmt::Debug> fmt::Debug for Outline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Outline").field(&self.0.borrow()).finish()
    }
}

/// Drags a tab or tabset (or a tab that does not exist yet) to a new home.
///
/// Clicking a tab selects it; double clicking a tabset toggles maximize.
pub struct NodeDragController {
    model: SharedModel,
    item: DragItem,
    outline: Outline<DropInfo>,
    outcome: Rc<RefCell<Option<ActionOutcome>>>,
}

impl NodeDragController {
    pub fn new(model: SharedModel, item: DragItem) -> Self {
        Self {
            model,
            item,
            outline: Outline::default(),
            outcome: Rc::new(RefCell::new(None)),
        }
    }

    /// Last resolved drop target, for painting.
    #[must_use]
    pub fn outline(&self) -> Outline<DropInfo> {
        self.outline.clone()
    }

    /// Outcome of the action the gesture dispatched, once it has ended.
    #[must_use]
    pub fn outcome(&self) -> Rc<RefCell<Option<ActionOutcome>>> {
        Rc::clone(&self.outcome)
    }

    fn dispatch(&self, action: Action) {
        let outcome = self.model.borrow_mut().dispatch(action);
        *self.outcome.borrow_mut() = Some(outcome);
    }

    fn existing_of_type(&self, node_type: NodeType) -> Option<NodeId> {
        let id = self.item.node_id()?;
        let model = self.model.borrow();
        (model.node(id)?.node_type() == node_type).then(|| id.clone())
    }
}

impl fmt::Debug for NodeDragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDragController")
            .field("item", &self.item)
            .field("outline", &self.outline)
            .finish_non_exhaustive()
    }
}

impl DragHandler for NodeDragController {
    fn drag_start(&mut self, _origin: PointerPosition) -> bool {
        let model = self.model.borrow();
        if model.maximized_tabset().is_some() {
            return false;
        }
        match &self.item {
            DragItem::Existing { id } => model.is_drag_enabled(id),
            DragItem::NewTab { .. } => true,
        }
    }

    fn drag_move(&mut self, position: PointerPosition) {
        let found = self
            .model
            .borrow()
            .find_drop_target(&self.item, position.x, position.y);
        if found.is_some() {
            self.outline.set(found);
        }
    }

    fn drag_end(&mut self, _position: PointerPosition) {
        let Some(info) = self.outline.take() else {
            debug!("drag ended without a drop target");
            return;
        };
        let action = match &self.item {
            DragItem::Existing { id } => Action::move_node(id, info.node, info.location, info.index),
            DragItem::NewTab { json } => Action::add_node(json.clone(), info.node, info.location, info.index),
        };
        self.dispatch(action);
    }

    fn drag_cancel(&mut self, _was_dragging: bool) {
        self.outline.set(None);
    }

    fn click(&mut self, _position: PointerPosition) {
        if let Some(tab) = self.existing_of_type(NodeType::Tab) {
            self.dispatch(Action::select_tab(tab));
        }
    }

    fn double_click(&mut self, _position: PointerPosition) {
        let Some(tabset) = self.existing_of_type(NodeType::TabSet) else {
            return;
        };
        if self.model.borrow().is_maximize_enabled(&tabset) {
            self.dispatch(Action::maximize_toggle(tabset));
        }
    }
}

/// Drags a row or border splitter.
///
/// The outline is the splitter rectangle at its clamped position; release
/// dispatches the matching split action.
pub struct SplitterDragController {
    model: SharedModel,
    splitter: NodeId,
    grab_offset: i32,
    outline: Outline<Rect>,
}

impl SplitterDragController {
    pub fn new(model: SharedModel, splitter: impl Into<NodeId>) -> Self {
        Self {
            model,
            splitter: splitter.into(),
            grab_offset: 0,
            outline: Outline::default(),
        }
    }

    #[must_use]
    pub fn outline(&self) -> Outline<Rect> {
        self.outline.clone()
    }

    /// Splitter rect and drag axis.
    fn geometry(&self, model: &Model) -> Option<(Rect, Orientation)> {
        let node = model.node(&self.splitter)?;
        Some((node.rect(), node.as_splitter()?.axis()))
    }

    /// Leading edge of the splitter for a pointer at `position`, clamped.
    fn leading_edge(&self, model: &Model, position: PointerPosition) -> Option<(i32, Rect)> {
        let (rect, axis) = self.geometry(model)?;
        let (lo, hi) = model.splitter_bounds(&self.splitter)?;
        let along = match axis {
            Orientation::Horz => position.x,
            Orientation::Vert => position.y,
        };
        let edge = (along - self.grab_offset).clamp(lo, hi);
        let moved = match axis {
            Orientation::Horz => Rect::new(edge, rect.y, rect.width, rect.height),
            Orientation::Vert => Rect::new(rect.x, edge, rect.width, rect.height),
        };
        Some((edge, moved))
    }
}

impl fmt::Debug for SplitterDragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitterDragController")
            .field("splitter", &self.splitter)
            .field("grab_offset", &self.grab_offset)
            .field("outline", &self.outline)
            .finish_non_exhaustive()
    }
}

impl DragHandler for SplitterDragController {
    fn drag_start(&mut self, origin: PointerPosition) -> bool {
        let model = self.model.borrow();
        let Some((rect, axis)) = self.geometry(&model) else {
            return false;
        };
        if model.splitter_bounds(&self.splitter).is_none() {
            return false;
        }
        let along = match axis {
            Orientation::Horz => origin.x,
            Orientation::Vert => origin.y,
        };
        self.grab_offset = along - axis_start(rect, axis);
        self.outline.set(Some(rect));
        true
    }

    fn drag_move(&mut self, position: PointerPosition) {
        let moved = self.leading_edge(&self.model.borrow(), position).map(|(_, rect)| rect);
        if moved.is_some() {
            self.outline.set(moved);
        }
    }

    fn drag_end(&mut self, position: PointerPosition) {
        self.outline.set(None);
        let action = {
            let model = self.model.borrow();
            self.leading_edge(&model, position)
                .and_then(|(edge, _)| model.split_action(&self.splitter, edge))
        };
        if let Some(action) = action {
            self.model.borrow_mut().dispatch(action);
        }
    }

    fn drag_cancel(&mut self, _was_dragging: bool) {
        self.outline.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock_location::DockLocation;
    use crate::drag::DragSession;
    use serde_json::json;
    use std::time::{Duration, Instant};

    fn shared() -> SharedModel {
        let mut model = Model::from_json(&json!({
            "layout": {"type": "row", "children": [
                {"type": "tabset", "id": "ts1", "children": [
                    {"type": "tab", "id": "a"}, {"type": "tab", "id": "b"}
                ]},
                {"type": "tabset", "id": "ts2", "children": [{"type": "tab", "id": "c"}]}
            ]}
        }))
        .unwrap();
        model.layout(Rect::new(0, 0, 1000, 500));
        Rc::new(RefCell::new(model))
    }

    fn p(x: i32, y: i32) -> PointerPosition {
        PointerPosition::new(x, y)
    }

    #[test]
    fn dragging_tab_into_other_tabset() {
        let model = shared();
        let controller = NodeDragController::new(Rc::clone(&model), DragItem::existing("a"));
        let outline = controller.outline();
        let outcome = controller.outcome();
        let mut session: DragSession = DragSession::default();
        session.pointer_down(p(10, 10), Box::new(controller));
        session.pointer_move(p(750, 250));
        let info = outline.get().unwrap();
        assert_eq!(info.node.as_str(), "ts2");
        assert_eq!(info.location, DockLocation::Center);
        // Leaving every target keeps the last one.
        session.pointer_move(p(-50, -50));
        assert!(outline.get().is_some());
        session.pointer_move(p(750, 250));
        session.pointer_up(p(750, 250), Instant::now());
        assert_eq!(*outcome.borrow(), Some(ActionOutcome::Applied));
        assert!(outline.get().is_none());
        let model = model.borrow();
        assert_eq!(model.children("ts2"), &[NodeId::from("c"), NodeId::from("a")]);
    }

    #[test]
    fn new_tab_drag_adds_node() {
        let model = shared();
        let controller = NodeDragController::new(
            Rc::clone(&model),
            DragItem::new_tab(json!({"type": "tab", "id": "fresh", "name": "Fresh"})),
        );
        let mut session: DragSession = DragSession::default();
        session.pointer_down(p(0, 0), Box::new(controller));
        session.pointer_move(p(250, 250));
        session.pointer_up(p(250, 250), Instant::now());
        let model = model.borrow();
        assert_eq!(model.node("fresh").unwrap().parent().map(NodeId::as_str), Some("ts1"));
    }

    #[test]
    fn maximized_model_vetoes_node_drag() {
        let model = shared();
        model.borrow_mut().dispatch(Action::maximize_toggle("ts1"));
        let mut controller = NodeDragController::new(Rc::clone(&model), DragItem::existing("a"));
        assert!(!controller.drag_start(p(0, 0)));
    }

    #[test]
    fn click_selects_and_double_click_maximizes() {
        let model = shared();
        let mut session: DragSession = DragSession::default();
        let t0 = Instant::now();
        session.pointer_down(p(5, 5), Box::new(NodeDragController::new(Rc::clone(&model), DragItem::existing("b"))));
        session.pointer_up(p(5, 5), t0);
        assert_eq!(model.borrow().node("ts1").unwrap().selected(), Some(1));

        for dt in [100, 200] {
            session.pointer_down(
                p(300, 2),
                Box::new(NodeDragController::new(Rc::clone(&model), DragItem::existing("ts1"))),
            );
            session.pointer_up(p(300, 2), t0 + Duration::from_millis(dt));
        }
        assert_eq!(model.borrow().maximized_tabset().map(NodeId::as_str), Some("ts1"));
    }

    #[test]
    fn splitter_drag_clamps_and_commits() {
        let model = shared();
        model.borrow_mut().dispatch(Action::update_node_attributes(
            "ts2",
            json!({"minWidth": 200}).as_object().unwrap().clone(),
        ));
        let splitter = model.borrow().draw_children(model.borrow().root())[1].clone();
        let controller = SplitterDragController::new(Rc::clone(&model), splitter.clone());
        let outline = controller.outline();
        let mut session: DragSession = DragSession::default();
        // Grab 3 px into the splitter at x = 496.
        session.pointer_down(p(499, 100), Box::new(controller));
        session.pointer_move(p(950, 100));
        // Right edge 1000, splitter 8, min 200.
        assert_eq!(outline.get().unwrap().x, 792);
        session.pointer_up(p(950, 100), Instant::now());
        assert!(outline.get().is_none());
        let model = model.borrow();
        assert_eq!(model.node("ts1").unwrap().rect().width, 792);
        assert_eq!(model.node(&splitter).unwrap().rect().x, 792);
    }

    #[test]
    fn cancelled_splitter_drag_changes_nothing() {
        let model = shared();
        let before = model.borrow().to_json();
        let splitter = model.borrow().draw_children(model.borrow().root())[1].clone();
        let controller = SplitterDragController::new(Rc::clone(&model), splitter);
        let outline = controller.outline();
        let mut session: DragSession = DragSession::default();
        session.pointer_down(p(499, 100), Box::new(controller));
        session.pointer_move(p(600, 100));
        assert!(outline.get().is_some());
        session.cancel();
        assert!(outline.get().is_none());
        assert_eq!(model.borrow().to_json(), before);
    }
}
