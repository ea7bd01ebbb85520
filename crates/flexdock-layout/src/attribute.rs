#![forbid(unsafe_code)]

//! Declarative attribute schema used at the JSON boundary.
//!
//! Every node type registers an ordered table of [`Attribute`] descriptors.
//! The table drives loading, partial updates, defaulting and the
//! "write only what differs from the default" serialization rule, while the
//! node itself keeps its attributes as typed fields reached through
//! [`AttributeTarget`].

use flexdock_core::geometry::Insets;
use serde_json::{Map, Value};

/// A typed attribute holder addressed by attribute name.
///
/// `get` returns `None` for attributes that are unset (inherited values with
/// no local override). `set` with [`Value::Null`] clears an optional
/// attribute; values of the wrong JSON type are ignored.
pub trait AttributeTarget {
    fn get(&self, name: &str) -> Option<Value>;
    fn set(&mut self, name: &str, value: Value);
}

/// One attribute descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: &'static str,
    model_name: Option<&'static str>,
    default: Value,
    always_serialize: bool,
}

impl Attribute {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Global-config key consulted when the node leaves this attribute unset.
    #[must_use]
    pub const fn model_name(&self) -> Option<&'static str> {
        self.model_name
    }

    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    #[must_use]
    pub const fn is_always_serialized(&self) -> bool {
        self.always_serialize
    }

    /// Write this attribute even when it equals its default.
    pub fn always_serialize(&mut self) -> &mut Self {
        self.always_serialize = true;
        self
    }
}

/// Ordered attribute table for one node type (or the global config).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeDefinitions {
    attributes: Vec<Attribute>,
}

impl AttributeDefinitions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attribute with a default value.
    pub fn add(&mut self, name: &'static str, default: Value) -> &mut Attribute {
        self.push(Attribute {
            name,
            model_name: None,
            default,
            always_serialize: false,
        })
    }

    /// Register an attribute that falls back to the global `model_name` key
    /// when unset on the node.
    pub fn add_inherited(&mut self, name: &'static str, model_name: &'static str) -> &mut Attribute {
        self.push(Attribute {
            name,
            model_name: Some(model_name),
            default: Value::Null,
            always_serialize: false,
        })
    }

    fn push(&mut self, attribute: Attribute) -> &mut Attribute {
        debug_assert!(
            self.get(attribute.name).is_none(),
            "attribute {} registered twice",
            attribute.name
        );
        let index = self.attributes.len();
        self.attributes.push(attribute);
        &mut self.attributes[index]
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Global-config key for an inherited attribute.
    #[must_use]
    pub fn model_fallback(&self, name: &str) -> Option<&'static str> {
        self.get(name).and_then(Attribute::model_name)
    }

    /// Write every default into `target`.
    pub fn set_defaults<T: AttributeTarget + ?Sized>(&self, target: &mut T) {
        for attribute in &self.attributes {
            target.set(attribute.name, attribute.default.clone());
        }
    }

    /// Total overwrite: copy present values, default the rest.
    pub fn from_json<T: AttributeTarget + ?Sized>(&self, json: &Map<String, Value>, target: &mut T) {
        for attribute in &self.attributes {
            let value = json
                .get(attribute.name)
                .cloned()
                .unwrap_or_else(|| attribute.default.clone());
            target.set(attribute.name, value);
        }
    }

    /// Partial patch: only attributes present in `json` are touched.
    pub fn update<T: AttributeTarget + ?Sized>(&self, json: &Map<String, Value>, target: &mut T) {
        for attribute in &self.attributes {
            if let Some(value) = json.get(attribute.name) {
                target.set(attribute.name, value.clone());
            }
        }
    }

    /// Serialize attributes that are set and either always serialized or
    /// different from their default.
    pub fn to_json<T: AttributeTarget + ?Sized>(&self, target: &T, json: &mut Map<String, Value>) {
        for attribute in &self.attributes {
            let Some(value) = target.get(attribute.name) else {
                continue;
            };
            if attribute.always_serialize || value != attribute.default {
                json.insert(attribute.name.to_owned(), value);
            }
        }
    }
}

// ── Value conversion helpers shared by the typed attribute holders ──────

/// Integral floats become JSON integers so `100.0` compares equal to a
/// `100` default.
pub(crate) fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

pub(crate) fn as_i32(value: &Value) -> Option<i32> {
    if let Some(v) = value.as_i64() {
        return Some(v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32);
    }
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32)
}

pub(crate) fn as_f64(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

pub(crate) fn as_bool(value: &Value) -> Option<bool> {
    value.as_bool()
}

pub(crate) fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

pub(crate) fn as_insets(value: &Value) -> Option<Insets> {
    serde_json::from_value(value.clone()).ok()
}

pub(crate) fn insets_value(insets: Insets) -> Value {
    serde_json::to_value(insets).unwrap_or(Value::Null)
}

/// Assign an optional attribute: `null` clears, a parseable value sets,
/// anything else is ignored.
pub(crate) fn set_opt<T>(slot: &mut Option<T>, value: &Value, parse: impl Fn(&Value) -> Option<T>) {
    if value.is_null() {
        *slot = None;
    } else if let Some(parsed) = parse(value) {
        *slot = Some(parsed);
    }
}

/// Assign a required attribute; unparseable values are ignored.
pub(crate) fn set_req<T>(slot: &mut T, value: &Value, parse: impl Fn(&Value) -> Option<T>) {
    if let Some(parsed) = parse(value) {
        *slot = parsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Bag(BTreeMap<String, Value>);

    impl AttributeTarget for Bag {
        fn get(&self, name: &str) -> Option<Value> {
            self.0.get(name).filter(|v| !v.is_null()).cloned()
        }

        fn set(&mut self, name: &str, value: Value) {
            self.0.insert(name.to_owned(), value);
        }
    }

    fn defs() -> AttributeDefinitions {
        let mut defs = AttributeDefinitions::new();
        defs.add("type", json!("thing")).always_serialize();
        defs.add("weight", json!(100));
        defs.add("name", Value::Null);
        defs.add_inherited("enableDrag", "thingEnableDrag");
        defs
    }

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn from_json_overwrites_and_defaults() {
        let mut bag = Bag::default();
        bag.set("name", json!("stale"));
        defs().from_json(&obj(json!({"weight": 30})), &mut bag);
        assert_eq!(bag.get("weight"), Some(json!(30)));
        assert_eq!(bag.get("type"), Some(json!("thing")));
        assert_eq!(bag.get("name"), None);
        assert_eq!(bag.get("enableDrag"), None);
    }

    #[test]
    fn update_touches_only_present_keys() {
        let mut bag = Bag::default();
        defs().set_defaults(&mut bag);
        bag.set("name", json!("keep"));
        defs().update(&obj(json!({"weight": 7, "unknown": 1})), &mut bag);
        assert_eq!(bag.get("weight"), Some(json!(7)));
        assert_eq!(bag.get("name"), Some(json!("keep")));
        assert!(bag.get("unknown").is_none());
    }

    #[test]
    fn to_json_skips_defaults_but_keeps_always_serialized() {
        let mut bag = Bag::default();
        defs().set_defaults(&mut bag);
        let mut out = Map::new();
        defs().to_json(&bag, &mut out);
        assert_eq!(Value::Object(out), json!({"type": "thing"}));

        bag.set("weight", json!(40));
        bag.set("enableDrag", json!(false));
        let mut out = Map::new();
        defs().to_json(&bag, &mut out);
        assert_eq!(
            Value::Object(out),
            json!({"type": "thing", "weight": 40, "enableDrag": false})
        );
    }

    #[test]
    fn iteration_follows_registration_order() {
        let names: Vec<_> = defs().iter().map(Attribute::name).collect();
        assert_eq!(names, ["type", "weight", "name", "enableDrag"]);
    }

    #[test]
    fn model_fallback_only_for_inherited() {
        let defs = defs();
        assert_eq!(defs.model_fallback("enableDrag"), Some("thingEnableDrag"));
        assert_eq!(defs.model_fallback("weight"), None);
        assert_eq!(defs.model_fallback("missing"), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "registered twice")]
    fn duplicate_registration_fails_fast() {
        let mut defs = AttributeDefinitions::new();
        defs.add("weight", json!(1));
        defs.add("weight", json!(2));
    }

    #[test]
    fn number_value_normalizes_integral_floats() {
        assert_eq!(number_value(100.0), json!(100));
        assert_eq!(number_value(12.5), json!(12.5));
        assert_eq!(as_i32(&json!(20.6)), Some(21));
        assert_eq!(as_i32(&json!("x")), None);
    }

    #[test]
    fn set_opt_clears_on_null_and_ignores_wrong_types() {
        let mut slot = Some(3);
        set_opt(&mut slot, &json!("nope"), as_i32);
        assert_eq!(slot, Some(3));
        set_opt(&mut slot, &Value::Null, as_i32);
        assert_eq!(slot, None);
        set_opt(&mut slot, &json!(9), as_i32);
        assert_eq!(slot, Some(9));
    }
}
