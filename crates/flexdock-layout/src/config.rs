#![forbid(unsafe_code)]

//! Global model options.
//!
//! Nodes that leave an inheritable attribute unset resolve it here through
//! the attribute table's model fallback key.

use std::sync::OnceLock;

use flexdock_core::geometry::Insets;
use serde_json::{Map, Value, json};

use crate::attribute::{
    AttributeDefinitions, AttributeTarget, as_bool, as_f64, as_i32, as_insets, as_string,
    insets_value, number_value, set_opt, set_req,
};

/// Default splitter thickness in pixels.
pub const DEFAULT_SPLITTER_SIZE: i32 = 8;

/// Typed global configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub splitter_size: i32,
    pub enable_edge_dock: bool,
    pub margin_insets: Insets,

    pub tab_enable_close: bool,
    pub tab_enable_drag: bool,
    pub tab_enable_rename: bool,
    pub tab_class_name: Option<String>,
    pub tab_icon: Option<String>,
    pub tab_enable_render_on_demand: bool,
    /// Consumed by the view layer only.
    pub tab_drag_speed: f64,

    pub tab_set_enable_delete_when_empty: bool,
    pub tab_set_enable_drop: bool,
    pub tab_set_enable_drag: bool,
    pub tab_set_enable_divide: bool,
    pub tab_set_enable_maximize: bool,
    pub tab_set_enable_tab_strip: bool,
    pub tab_set_class_name_tab_strip: Option<String>,
    pub tab_set_class_name_header: Option<String>,
    pub tab_set_header_height: i32,
    pub tab_set_tab_strip_height: i32,
    pub tab_set_min_width: i32,
    pub tab_set_min_height: i32,
    pub tab_set_border_insets: Insets,
    pub tab_set_margin_insets: Insets,

    pub border_bar_size: i32,
    pub border_enable_drop: bool,
    pub border_class_name: Option<String>,
    pub border_min_size: i32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            splitter_size: DEFAULT_SPLITTER_SIZE,
            enable_edge_dock: true,
            margin_insets: Insets::ZERO,
            tab_enable_close: true,
            tab_enable_drag: true,
            tab_enable_rename: true,
            tab_class_name: None,
            tab_icon: None,
            tab_enable_render_on_demand: true,
            tab_drag_speed: 0.3,
            tab_set_enable_delete_when_empty: true,
            tab_set_enable_drop: true,
            tab_set_enable_drag: true,
            tab_set_enable_divide: true,
            tab_set_enable_maximize: true,
            tab_set_enable_tab_strip: true,
            tab_set_class_name_tab_strip: None,
            tab_set_class_name_header: None,
            tab_set_header_height: 20,
            tab_set_tab_strip_height: 20,
            tab_set_min_width: 0,
            tab_set_min_height: 0,
            tab_set_border_insets: Insets::ZERO,
            tab_set_margin_insets: Insets::ZERO,
            border_bar_size: 25,
            border_enable_drop: true,
            border_class_name: None,
            border_min_size: 0,
        }
    }
}

impl ModelConfig {
    /// Attribute table for the `global` JSON object.
    pub fn attribute_definitions() -> &'static AttributeDefinitions {
        static DEFS: OnceLock<AttributeDefinitions> = OnceLock::new();
        DEFS.get_or_init(|| {
            let zero = insets_value(Insets::ZERO);
            let mut d = AttributeDefinitions::new();
            d.add("splitterSize", json!(DEFAULT_SPLITTER_SIZE));
            d.add("enableEdgeDock", json!(true));
            d.add("marginInsets", zero.clone());

            d.add("tabEnableClose", json!(true));
            d.add("tabEnableDrag", json!(true));
            d.add("tabEnableRename", json!(true));
            d.add("tabClassName", Value::Null);
            d.add("tabIcon", Value::Null);
            d.add("tabEnableRenderOnDemand", json!(true));
            d.add("tabDragSpeed", json!(0.3));

            d.add("tabSetEnableDeleteWhenEmpty", json!(true));
            d.add("tabSetEnableDrop", json!(true));
            d.add("tabSetEnableDrag", json!(true));
            d.add("tabSetEnableDivide", json!(true));
            d.add("tabSetEnableMaximize", json!(true));
            d.add("tabSetEnableTabStrip", json!(true));
            d.add("tabSetClassNameTabStrip", Value::Null);
            d.add("tabSetClassNameHeader", Value::Null);
            d.add("tabSetHeaderHeight", json!(20));
            d.add("tabSetTabStripHeight", json!(20));
            d.add("tabSetMinWidth", json!(0));
            d.add("tabSetMinHeight", json!(0));
            d.add("tabSetBorderInsets", zero.clone());
            d.add("tabSetMarginInsets", zero);

            d.add("borderBarSize", json!(25));
            d.add("borderEnableDrop", json!(true));
            d.add("borderClassName", Value::Null);
            d.add("borderMinSize", json!(0));
            d
        })
    }

    /// Load from a `global` JSON object; missing keys take their defaults.
    #[must_use]
    pub fn from_json(json: &Map<String, Value>) -> Self {
        let mut config = Self::default();
        Self::attribute_definitions().from_json(json, &mut config);
        config
    }

    /// Apply a partial patch.
    pub fn update(&mut self, json: &Map<String, Value>) {
        Self::attribute_definitions().update(json, self);
    }

    /// Non-default options only.
    #[must_use]
    pub fn to_json(&self) -> Map<String, Value> {
        let mut json = Map::new();
        Self::attribute_definitions().to_json(self, &mut json);
        json
    }
}

impl AttributeTarget for ModelConfig {
    fn get(&self, name: &str) -> Option<Value> {
        let value = match name {
            "splitterSize" => json!(self.splitter_size),
            "enableEdgeDock" => json!(self.enable_edge_dock),
            "marginInsets" => insets_value(self.margin_insets),
            "tabEnableClose" => json!(self.tab_enable_close),
            "tabEnableDrag" => json!(self.tab_enable_drag),
            "tabEnableRename" => json!(self.tab_enable_rename),
            "tabClassName" => return self.tab_class_name.clone().map(Value::from),
            "tabIcon" => return self.tab_icon.clone().map(Value::from),
            "tabEnableRenderOnDemand" => json!(self.tab_enable_render_on_demand),
            "tabDragSpeed" => number_value(self.tab_drag_speed),
            "tabSetEnableDeleteWhenEmpty" => json!(self.tab_set_enable_delete_when_empty),
            "tabSetEnableDrop" => json!(self.tab_set_enable_drop),
            "tabSetEnableDrag" => json!(self.tab_set_enable_drag),
            "tabSetEnableDivide" => json!(self.tab_set_enable_divide),
            "tabSetEnableMaximize" => json!(self.tab_set_enable_maximize),
            "tabSetEnableTabStrip" => json!(self.tab_set_enable_tab_strip),
            "tabSetClassNameTabStrip" => {
                return self.tab_set_class_name_tab_strip.clone().map(Value::from);
            }
            "tabSetClassNameHeader" => {
                return self.tab_set_class_name_header.clone().map(Value::from);
            }
            "tabSetHeaderHeight" => json!(self.tab_set_header_height),
            "tabSetTabStripHeight" => json!(self.tab_set_tab_strip_height),
            "tabSetMinWidth" => json!(self.tab_set_min_width),
            "tabSetMinHeight" => json!(self.tab_set_min_height),
            "tabSetBorderInsets" => insets_value(self.tab_set_border_insets),
            "tabSetMarginInsets" => insets_value(self.tab_set_margin_insets),
            "borderBarSize" => json!(self.border_bar_size),
            "borderEnableDrop" => json!(self.border_enable_drop),
            "borderClassName" => return self.border_class_name.clone().map(Value::from),
            "borderMinSize" => json!(self.border_min_size),
            _ => return None,
        };
        Some(value)
    }

    fn set(&mut self, name: &str, value: Value) {
        let v = &value;
        match name {
            "splitterSize" => set_req(&mut self.splitter_size, v, |v| as_i32(v).map(|s| s.max(0))),
            "enableEdgeDock" => set_req(&mut self.enable_edge_dock, v, as_bool),
            "marginInsets" => set_req(&mut self.margin_insets, v, as_insets),
            "tabEnableClose" => set_req(&mut self.tab_enable_close, v, as_bool),
            "tabEnableDrag" => set_req(&mut self.tab_enable_drag, v, as_bool),
            "tabEnableRename" => set_req(&mut self.tab_enable_rename, v, as_bool),
            "tabClassName" => set_opt(&mut self.tab_class_name, v, as_string),
            "tabIcon" => set_opt(&mut self.tab_icon, v, as_string),
            "tabEnableRenderOnDemand" => set_req(&mut self.tab_enable_render_on_demand, v, as_bool),
            "tabDragSpeed" => set_req(&mut self.tab_drag_speed, v, as_f64),
            "tabSetEnableDeleteWhenEmpty" => {
                set_req(&mut self.tab_set_enable_delete_when_empty, v, as_bool);
            }
            "tabSetEnableDrop" => set_req(&mut self.tab_set_enable_drop, v, as_bool),
            "tabSetEnableDrag" => set_req(&mut self.tab_set_enable_drag, v, as_bool),
            "tabSetEnableDivide" => set_req(&mut self.tab_set_enable_divide, v, as_bool),
            "tabSetEnableMaximize" => set_req(&mut self.tab_set_enable_maximize, v, as_bool),
            "tabSetEnableTabStrip" => set_req(&mut self.tab_set_enable_tab_strip, v, as_bool),
            "tabSetClassNameTabStrip" => set_opt(&mut self.tab_set_class_name_tab_strip, v, as_string),
            "tabSetClassNameHeader" => set_opt(&mut self.tab_set_class_name_header, v, as_string),
            "tabSetHeaderHeight" => set_req(&mut self.tab_set_header_height, v, as_i32),
            "tabSetTabStripHeight" => set_req(&mut self.tab_set_tab_strip_height, v, as_i32),
            "tabSetMinWidth" => set_req(&mut self.tab_set_min_width, v, as_i32),
            "tabSetMinHeight" => set_req(&mut self.tab_set_min_height, v, as_i32),
            "tabSetBorderInsets" => set_req(&mut self.tab_set_border_insets, v, as_insets),
            "tabSetMarginInsets" => set_req(&mut self.tab_set_margin_insets, v, as_insets),
            "borderBarSize" => set_req(&mut self.border_bar_size, v, as_i32),
            "borderEnableDrop" => set_req(&mut self.border_enable_drop, v, as_bool),
            "borderClassName" => set_opt(&mut self.border_class_name, v, as_string),
            "borderMinSize" => set_req(&mut self.border_min_size, v, as_i32),
            _ => {}
        }
    }
}
