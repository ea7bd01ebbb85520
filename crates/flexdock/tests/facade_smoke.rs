//! The facade exposes enough to load, drive and save a layout.

use flexdock::prelude::*;
use serde_json::json;

fn sample() -> serde_json::Value {
    json!({
        "borders": [{"type": "border", "location": "right", "children": [{"type": "tab", "id": "props"}]}],
        "layout": {"type": "row", "children": [
            {"type": "tabset", "id": "main", "children": [
                {"type": "tab", "id": "a", "name": "A"}, {"type": "tab", "id": "b", "name": "B"}
            ]}
        ]}
    })
}

#[test]
fn prelude_drives_a_model() {
    let mut model = Model::from_json(&sample()).unwrap();
    model.layout(Rect::new(0, 0, 800, 600));
    let outcome = model.dispatch(Action::move_node("b", "main", DockLocation::Right, None));
    assert_eq!(outcome, ActionOutcome::Applied);
    assert_eq!(model.children(model.root()).len(), 2);
    assert!(model.nodes().any(|n| n.node_type() == NodeType::TabSet && n.id().as_str() != "main"));
}

#[test]
fn save_and_load_round_trip() {
    let mut model = Model::from_json(&sample()).unwrap();
    model.dispatch(Action::rename_tab("a", "Editor"));
    let path = std::env::temp_dir().join(format!("flexdock-facade-{}.json", std::process::id()));
    flexdock::save_layout(&model, &path).unwrap();
    let loaded = flexdock::load_layout(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded.to_json(), model.to_json());
    assert_eq!(loaded.node("a").and_then(Node::name), Some("Editor"));
}

#[test]
fn load_errors_are_typed() {
    let missing = std::env::temp_dir().join("flexdock-facade-does-not-exist.json");
    assert!(matches!(flexdock::load_layout(&missing), Err(Error::Io(_))));

    let path = std::env::temp_dir().join(format!("flexdock-facade-bad-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"borders": []}"#).unwrap();
    let err = flexdock::load_layout(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, Error::Model(flexdock::ModelError::MissingLayout)));
    assert_eq!(err.to_string(), "model json has no `layout`");
}
