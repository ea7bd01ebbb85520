#![forbid(unsafe_code)]

//! The persisted form: `{ global, borders, layout }`.

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

use crate::config::ModelConfig;
use crate::dock_location::DockLocation;
use crate::error::ModelError;
use crate::model::Model;
use crate::node::{BorderNode, Node, NodeId, NodeKind, NodeType, RowNode, TabNode, TabSetNode};

const ROW_CHILDREN: &[NodeType] = &[NodeType::Row, NodeType::TabSet];
const TAB_CHILDREN: &[NodeType] = &[NodeType::Tab];

impl Model {
    /// Build a model from its persisted JSON.
    pub fn from_json(json: &Value) -> Result<Self, ModelError> {
        let obj = json
            .as_object()
            .ok_or(ModelError::ExpectedObject { context: "model" })?;
        let config = obj
            .get("global")
            .and_then(Value::as_object)
            .map(ModelConfig::from_json)
            .unwrap_or_default();

        let mut reserved = BTreeSet::new();
        if let Some(borders) = obj.get("borders") {
            collect_ids(borders, &mut reserved)?;
        }
        let layout = obj.get("layout").ok_or(ModelError::MissingLayout)?;
        collect_ids(layout, &mut reserved)?;

        let mut model = Self::bare(config);
        if let Some(borders) = obj.get("borders").and_then(Value::as_array) {
            for border in borders {
                let id = model.load_node(border, &reserved, &[NodeType::Border], "border")?;
                model.borders.push(id);
            }
        }
        model.root = model.load_node(layout, &reserved, &[NodeType::Row], "layout")?;

        let containers: Vec<NodeId> = model
            .nodes
            .values()
            .filter(|n| matches!(n.node_type(), NodeType::TabSet | NodeType::Border))
            .map(|n| n.id.clone())
            .collect();
        for id in &containers {
            model.normalize_selection(id);
        }
        model.tidy();
        Ok(model)
    }

    /// Parse `text` and build a model from it.
    pub fn from_json_str(text: &str) -> Result<Self, ModelError> {
        let json: Value = serde_json::from_str(text).map_err(|e| ModelError::InvalidJson {
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Persisted form; only non-default attributes are written.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let borders: Vec<Value> = self.borders.iter().map(|b| self.node_json(b)).collect();
        json!({
            "global": Value::Object(self.config.to_json()),
            "borders": borders,
            "layout": self.node_json(&self.root),
        })
    }

    /// Serialized form of a single node and its subtree.
    #[must_use]
    pub fn node_json(&self, id: &str) -> Value {
        let Some(node) = self.nodes.get(id) else {
            return Value::Null;
        };
        let Some(defs) = node.node_type().attribute_definitions() else {
            return Value::Null;
        };
        let mut map = Map::new();
        defs.to_json(node, &mut map);
        match node.node_type() {
            NodeType::Row | NodeType::TabSet | NodeType::Border => {
                let children: Vec<Value> = node.children.iter().map(|c| self.node_json(c)).collect();
                map.insert("children".to_owned(), Value::Array(children));
            }
            NodeType::Tab | NodeType::Splitter => {}
        }
        if node.node_type() == NodeType::TabSet {
            if self.active_tabset.as_ref() == Some(&node.id) {
                map.insert("active".to_owned(), Value::Bool(true));
            }
            if self.maximized_tabset.as_ref() == Some(&node.id) {
                map.insert("maximized".to_owned(), Value::Bool(true));
            }
        }
        Value::Object(map)
    }

    /// Build a detached tab or tabset for insertion by an action.
    pub(crate) fn build_node(&mut self, json: &Value) -> Result<NodeId, ModelError> {
        let mut reserved = BTreeSet::new();
        collect_ids(json, &mut reserved)?;
        if let Some(taken) = reserved.iter().find(|id| self.nodes.contains_key(id.as_str())) {
            return Err(ModelError::DuplicateId { id: taken.clone() });
        }
        let id = self.load_node(json, &reserved, &[NodeType::Tab, NodeType::TabSet], "new node")?;
        self.normalize_selection(&id);
        Ok(id)
    }

    /// Load one node and its subtree. Nothing is left in the arena on error.
    fn load_node(
        &mut self,
        json: &Value,
        reserved: &BTreeSet<String>,
        allowed: &[NodeType],
        context: &'static str,
    ) -> Result<NodeId, ModelError> {
        let obj = json.as_object().ok_or(ModelError::ExpectedObject { context })?;
        let type_name = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ModelError::MissingType { context })?;
        let node_type = NodeType::from_name(type_name)
            .filter(|t| allowed.contains(t))
            .ok_or_else(|| ModelError::UnexpectedType {
                found: type_name.to_owned(),
                context,
            })?;
        let kind = match node_type {
            NodeType::Row => NodeKind::Row(RowNode::default()),
            NodeType::TabSet => NodeKind::TabSet(TabSetNode::default()),
            NodeType::Tab | NodeType::Splitter => NodeKind::Tab(TabNode::default()),
            NodeType::Border => NodeKind::Border(BorderNode::new(self.border_location(obj)?)),
        };
        let id = match obj.get("id").and_then(Value::as_str) {
            Some(id) if self.nodes.contains_key(id) => {
                return Err(ModelError::DuplicateId { id: id.to_owned() });
            }
            Some(id) => NodeId::from(id),
            None => self.next_unique_id(reserved),
        };

        let mut node = Node::new(id.clone(), kind);
        if let Some(defs) = node_type.attribute_definitions() {
            defs.from_json(obj, &mut node);
        }

        let (child_types, child_context): (&[NodeType], &'static str) = match node_type {
            NodeType::Row => (ROW_CHILDREN, "row child"),
            NodeType::TabSet => (TAB_CHILDREN, "tabset child"),
            NodeType::Border => (TAB_CHILDREN, "border child"),
            NodeType::Tab | NodeType::Splitter => (&[], ""),
        };
        let children = obj.get("children").and_then(Value::as_array);
        if !child_types.is_empty() {
            for child in children.into_iter().flatten() {
                match self.load_node(child, reserved, child_types, child_context) {
                    Ok(child_id) => {
                        if let Some(child) = self.nodes.get_mut(&child_id) {
                            child.parent = Some(id.clone());
                        }
                        node.children.push(child_id);
                    }
                    Err(err) => {
                        for loaded in &node.children {
                            self.discard_subtree(loaded);
                        }
                        return Err(err);
                    }
                }
            }
        }
        self.nodes.insert(id.clone(), node);

        if node_type == NodeType::TabSet {
            if obj.get("active").and_then(Value::as_bool) == Some(true) {
                self.active_tabset = Some(id.clone());
            }
            if obj.get("maximized").and_then(Value::as_bool) == Some(true) {
                self.maximized_tabset = Some(id.clone());
            }
        }
        self.dirty = true;
        Ok(id)
    }

    fn border_location(&self, obj: &Map<String, Value>) -> Result<DockLocation, ModelError> {
        let name = obj.get("location").and_then(Value::as_str).unwrap_or("top");
        let location = DockLocation::from_name(name)
            .filter(|l| *l != DockLocation::Center)
            .ok_or_else(|| ModelError::UnknownBorderLocation {
                location: name.to_owned(),
            })?;
        if self.border(location).is_some() {
            return Err(ModelError::DuplicateBorder {
                location: name.to_owned(),
            });
        }
        Ok(location)
    }
}

/// Collect explicit ids in a node subtree, rejecting repeats.
fn collect_ids(json: &Value, ids: &mut BTreeSet<String>) -> Result<(), ModelError> {
    match json {
        Value::Array(items) => {
            for item in items {
                collect_ids(item, ids)?;
            }
        }
        Value::Object(obj) => {
            if let Some(id) = obj.get("id").and_then(Value::as_str) {
                if !ids.insert(id.to_owned()) {
                    return Err(ModelError::DuplicateId { id: id.to_owned() });
                }
            }
            if let Some(children) = obj.get("children") {
                collect_ids(children, ids)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        json!({
            "global": {"splitterSize": 4, "tabEnableClose": false},
            "borders": [
                {"type": "border", "location": "left", "id": "lb", "selected": 0, "size": 150,
                 "children": [{"type": "tab", "id": "files", "name": "Files", "component": "tree"}]}
            ],
            "layout": {"type": "row", "id": "root", "children": [
                {"type": "tabset", "id": "main", "weight": 70, "active": true, "selected": 1, "children": [
                    {"type": "tab", "id": "t1", "name": "One"},
                    {"type": "tab", "id": "t2", "name": "Two", "config": {"path": "/tmp"}}
                ]},
                {"type": "row", "id": "side", "weight": 30, "children": [
                    {"type": "tabset", "id": "s1", "name": "Tools", "children": [{"type": "tab", "id": "t3"}]},
                    {"type": "tabset", "id": "s2", "maximized": true, "children": [{"type": "tab", "id": "t4"}]}
                ]}
            ]}
        })
    }

    #[test]
    fn loads_structure_and_flags() {
        let model = Model::from_json(&sample()).unwrap();
        assert_eq!(model.root().as_str(), "root");
        assert_eq!(model.children("side"), &[NodeId::from("s1"), NodeId::from("s2")]);
        assert_eq!(model.node("t2").unwrap().parent().unwrap().as_str(), "main");
        assert_eq!(model.active_tabset().unwrap().as_str(), "main");
        assert_eq!(model.maximized_tabset().unwrap().as_str(), "s2");
        assert_eq!(model.selected_node("main").unwrap().id().as_str(), "t2");
        assert_eq!(model.config().splitter_size, 4);
        assert!(model.border(DockLocation::Left).unwrap().as_border().unwrap().is_open());
    }

    #[test]
    fn serialization_is_stable() {
        let model = Model::from_json(&sample()).unwrap();
        let first = model.to_json();
        let second = Model::from_json(&first).unwrap().to_json();
        assert_eq!(first, second);
        assert_eq!(first["global"], json!({"splitterSize": 4, "tabEnableClose": false}));
        assert_eq!(first["layout"]["children"][0]["active"], json!(true));
        assert_eq!(first["layout"]["children"][0]["weight"], json!(70));
        assert_eq!(first["layout"]["children"][1]["children"][1]["maximized"], json!(true));
        assert_eq!(first["borders"][0]["selected"], json!(0));
    }

    #[test]
    fn auto_ids_avoid_explicit_ones() {
        let model = Model::from_json(&json!({
            "layout": {"type": "row", "children": [
                {"type": "tabset", "children": [{"type": "tab"}, {"type": "tab", "id": "#2"}]}
            ]}
        }))
        .unwrap();
        let mut ids = Vec::new();
        model.visit_nodes(|n, _| ids.push(n.id().to_string()));
        let unique: BTreeSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.contains(&"#2".to_owned()));
    }

    #[test]
    fn loader_errors() {
        assert_eq!(
            Model::from_json_str("{").unwrap_err(),
            ModelError::InvalidJson {
                message: serde_json::from_str::<Value>("{").unwrap_err().to_string()
            }
        );
        assert_eq!(Model::from_json(&json!({})).unwrap_err(), ModelError::MissingLayout);
        assert_eq!(
            Model::from_json(&json!({"layout": {"type": "tabset"}})).unwrap_err(),
            ModelError::UnexpectedType { found: "tabset".into(), context: "layout" }
        );
        assert_eq!(
            Model::from_json(&json!({"layout": {"type": "row", "children": [{"id": "x"}]}})).unwrap_err(),
            ModelError::MissingType { context: "row child" }
        );
        assert_eq!(
            Model::from_json(&json!({"layout": {"type": "row", "children": [{"type": "tab"}]}})).unwrap_err(),
            ModelError::UnexpectedType { found: "tab".into(), context: "row child" }
        );
        assert_eq!(
            Model::from_json(&json!({
                "borders": [{"type": "border", "location": "middle"}],
                "layout": {"type": "row"}
            }))
            .unwrap_err(),
            ModelError::UnknownBorderLocation { location: "middle".into() }
        );
        assert_eq!(
            Model::from_json(&json!({"layout": {"type": "row", "children": [
                {"type": "tabset", "id": "dup"}, {"type": "tabset", "id": "dup"}
            ]}}))
            .unwrap_err(),
            ModelError::DuplicateId { id: "dup".into() }
        );
    }

    #[test]
    fn unknown_attributes_are_ignored() {
        let model = Model::from_json(&json!({
            "layout": {"type": "row", "children": [
                {"type": "tabset", "id": "ts", "color": "red", "children": [{"type": "tab", "id": "t", "bogus": 1}]}
            ]}
        }))
        .unwrap();
        let out = model.node_json("ts");
        assert!(out.get("color").is_none());
        assert!(out["children"][0].get("bogus").is_none());
    }

    #[test]
    fn build_node_leaves_nothing_behind_on_error() {
        let mut model = Model::from_json(&sample()).unwrap();
        let before = model.nodes().count();
        let err = model
            .build_node(&json!({"type": "tabset", "children": [{"type": "tab"}, {"type": "row"}]}))
            .unwrap_err();
        assert_eq!(err, ModelError::UnexpectedType { found: "row".into(), context: "tabset child" });
        assert_eq!(model.nodes().count(), before);
        assert_eq!(
            model.build_node(&json!({"type": "tab", "id": "t1"})).unwrap_err(),
            ModelError::DuplicateId { id: "t1".into() }
        );
    }
}
