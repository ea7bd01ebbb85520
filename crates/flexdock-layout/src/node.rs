#![forbid(unsafe_code)]

//! Node records stored in the model arena.
//!
//! A node is one of five closed variants. Structural links (`parent`,
//! `children`) live on [`Node`]; per-variant attributes and derived geometry
//! live on the variant struct. Inherited attributes are `None` until set and
//! resolve through [`crate::ModelConfig`].

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::OnceLock;

use flexdock_core::geometry::{Insets, Orientation, Rect};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::attribute::{
    AttributeDefinitions, AttributeTarget, as_bool, as_f64, as_i32, as_insets, as_string,
    insets_value, number_value, set_opt, set_req,
};
use crate::dock_location::DockLocation;

/// Default tab name when none is given.
pub const DEFAULT_TAB_NAME: &str = "[Unnamed Tab]";

/// Default weight of rows and tabsets.
pub const DEFAULT_WEIGHT: f64 = 100.0;

/// Default border panel thickness.
pub const DEFAULT_BORDER_SIZE: i32 = 200;

/// Stable node identifier, unique within a model.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for NodeId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

impl Deref for NodeId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// Node discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Row,
    TabSet,
    Tab,
    Border,
    Splitter,
}

impl NodeType {
    /// Persisted `type` value.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::TabSet => "tabset",
            Self::Tab => "tab",
            Self::Border => "border",
            Self::Splitter => "splitter",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "row" => Some(Self::Row),
            "tabset" => Some(Self::TabSet),
            "tab" => Some(Self::Tab),
            "border" => Some(Self::Border),
            "splitter" => Some(Self::Splitter),
            _ => None,
        }
    }

    /// Attribute table for this type. Splitters are never persisted.
    #[must_use]
    pub fn attribute_definitions(self) -> Option<&'static AttributeDefinitions> {
        match self {
            Self::Row => Some(row_attributes()),
            Self::TabSet => Some(tabset_attributes()),
            Self::Tab => Some(tab_attributes()),
            Self::Border => Some(border_attributes()),
            Self::Splitter => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn row_attributes() -> &'static AttributeDefinitions {
    static DEFS: OnceLock<AttributeDefinitions> = OnceLock::new();
    DEFS.get_or_init(|| {
        let mut d = AttributeDefinitions::new();
        d.add("type", json!("row")).always_serialize();
        d.add("id", Value::Null);
        d.add("weight", json!(100));
        d.add("width", Value::Null);
        d.add("height", Value::Null);
        d
    })
}

fn tabset_attributes() -> &'static AttributeDefinitions {
    static DEFS: OnceLock<AttributeDefinitions> = OnceLock::new();
    DEFS.get_or_init(|| {
        let mut d = AttributeDefinitions::new();
        d.add("type", json!("tabset")).always_serialize();
        d.add("id", Value::Null);
        d.add("weight", json!(100));
        d.add("width", Value::Null);
        d.add("height", Value::Null);
        d.add("selected", json!(0));
        d.add("name", Value::Null);

        d.add_inherited("enableDeleteWhenEmpty", "tabSetEnableDeleteWhenEmpty");
        d.add_inherited("enableDrop", "tabSetEnableDrop");
        d.add_inherited("enableDrag", "tabSetEnableDrag");
        d.add_inherited("enableDivide", "tabSetEnableDivide");
        d.add_inherited("enableMaximize", "tabSetEnableMaximize");
        d.add_inherited("enableTabStrip", "tabSetEnableTabStrip");
        d.add_inherited("classNameTabStrip", "tabSetClassNameTabStrip");
        d.add_inherited("classNameHeader", "tabSetClassNameHeader");
        d.add_inherited("borderInsets", "tabSetBorderInsets");
        d.add_inherited("marginInsets", "tabSetMarginInsets");
        d.add_inherited("headerHeight", "tabSetHeaderHeight");
        d.add_inherited("tabStripHeight", "tabSetTabStripHeight");
        d.add_inherited("minWidth", "tabSetMinWidth");
        d.add_inherited("minHeight", "tabSetMinHeight");
        d
    })
}

fn tab_attributes() -> &'static AttributeDefinitions {
    static DEFS: OnceLock<AttributeDefinitions> = OnceLock::new();
    DEFS.get_or_init(|| {
        let mut d = AttributeDefinitions::new();
        d.add("type", json!("tab")).always_serialize();
        d.add("id", Value::Null);
        d.add("name", json!(DEFAULT_TAB_NAME));
        d.add("component", Value::Null);
        d.add("config", Value::Null);

        d.add_inherited("enableClose", "tabEnableClose");
        d.add_inherited("enableDrag", "tabEnableDrag");
        d.add_inherited("enableRename", "tabEnableRename");
        d.add_inherited("className", "tabClassName");
        d.add_inherited("icon", "tabIcon");
        d.add_inherited("enableRenderOnDemand", "tabEnableRenderOnDemand");
        d
    })
}

fn border_attributes() -> &'static AttributeDefinitions {
    static DEFS: OnceLock<AttributeDefinitions> = OnceLock::new();
    DEFS.get_or_init(|| {
        let mut d = AttributeDefinitions::new();
        d.add("type", json!("border")).always_serialize();
        d.add("location", json!("top")).always_serialize();
        d.add("id", Value::Null);
        d.add("selected", json!(-1));
        d.add("size", json!(DEFAULT_BORDER_SIZE));
        d.add("show", json!(true));
        d.add("config", Value::Null);

        d.add_inherited("barSize", "borderBarSize");
        d.add_inherited("enableDrop", "borderEnableDrop");
        d.add_inherited("className", "borderClassName");
        d.add_inherited("minSize", "borderMinSize");
        d
    })
}

/// Container laying out its children along one axis by weight.
#[derive(Debug, Clone, PartialEq)]
pub struct RowNode {
    pub(crate) weight: f64,
    pub(crate) width: Option<i32>,
    pub(crate) height: Option<i32>,
    /// Splitters between consecutive children, regenerated by layout.
    pub(crate) splitters: Vec<NodeId>,
}

impl Default for RowNode {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            width: None,
            height: None,
            splitters: Vec::new(),
        }
    }
}

impl RowNode {
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn width(&self) -> Option<i32> {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> Option<i32> {
        self.height
    }

    #[must_use]
    pub fn splitters(&self) -> &[NodeId] {
        &self.splitters
    }

    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "weight" => Some(number_value(self.weight)),
            "width" => self.width.map(Value::from),
            "height" => self.height.map(Value::from),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, v: &Value) {
        match name {
            "weight" => set_req(&mut self.weight, v, |v| as_f64(v).map(|w| w.max(0.0))),
            "width" => set_opt(&mut self.width, v, as_i32),
            "height" => set_opt(&mut self.height, v, as_i32),
            _ => {}
        }
    }
}

/// Tab container with a selection, optional header and a tab strip.
#[derive(Debug, Clone, PartialEq)]
pub struct TabSetNode {
    pub(crate) weight: f64,
    pub(crate) width: Option<i32>,
    pub(crate) height: Option<i32>,
    pub(crate) selected: Option<usize>,
    pub(crate) name: Option<String>,

    pub(crate) enable_delete_when_empty: Option<bool>,
    pub(crate) enable_drop: Option<bool>,
    pub(crate) enable_drag: Option<bool>,
    pub(crate) enable_divide: Option<bool>,
    pub(crate) enable_maximize: Option<bool>,
    pub(crate) enable_tab_strip: Option<bool>,
    pub(crate) class_name_tab_strip: Option<String>,
    pub(crate) class_name_header: Option<String>,
    pub(crate) border_insets: Option<Insets>,
    pub(crate) margin_insets: Option<Insets>,
    pub(crate) header_height: Option<i32>,
    pub(crate) tab_strip_height: Option<i32>,
    pub(crate) min_width: Option<i32>,
    pub(crate) min_height: Option<i32>,

    pub(crate) content_rect: Rect,
    pub(crate) header_rect: Option<Rect>,
    pub(crate) tab_strip_rect: Option<Rect>,
}

impl Default for TabSetNode {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            width: None,
            height: None,
            selected: None,
            name: None,
            enable_delete_when_empty: None,
            enable_drop: None,
            enable_drag: None,
            enable_divide: None,
            enable_maximize: None,
            enable_tab_strip: None,
            class_name_tab_strip: None,
            class_name_header: None,
            border_insets: None,
            margin_insets: None,
            header_height: None,
            tab_strip_height: None,
            min_width: None,
            min_height: None,
            content_rect: Rect::empty(),
            header_rect: None,
            tab_strip_rect: None,
        }
    }
}

impl TabSetNode {
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn width(&self) -> Option<i32> {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> Option<i32> {
        self.height
    }

    /// Index of the selected tab; `None` only when empty.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Header title; a named tabset renders a header above its tab strip.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Area the selected tab's content occupies.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.content_rect
    }

    #[must_use]
    pub fn header_rect(&self) -> Option<Rect> {
        self.header_rect
    }

    #[must_use]
    pub fn tab_strip_rect(&self) -> Option<Rect> {
        self.tab_strip_rect
    }

    /// Rectangle probed for tab insertion during drags: the tab strip, or the
    /// header when the strip is disabled.
    #[must_use]
    pub fn tab_header_rect(&self) -> Option<Rect> {
        self.tab_strip_rect.or(self.header_rect)
    }

    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "weight" => Some(number_value(self.weight)),
            "width" => self.width.map(Value::from),
            "height" => self.height.map(Value::from),
            "selected" => Some(self.selected.map_or(json!(-1), |s| json!(s))),
            "name" => self.name.clone().map(Value::from),
            "enableDeleteWhenEmpty" => self.enable_delete_when_empty.map(Value::from),
            "enableDrop" => self.enable_drop.map(Value::from),
            "enableDrag" => self.enable_drag.map(Value::from),
            "enableDivide" => self.enable_divide.map(Value::from),
            "enableMaximize" => self.enable_maximize.map(Value::from),
            "enableTabStrip" => self.enable_tab_strip.map(Value::from),
            "classNameTabStrip" => self.class_name_tab_strip.clone().map(Value::from),
            "classNameHeader" => self.class_name_header.clone().map(Value::from),
            "borderInsets" => self.border_insets.map(insets_value),
            "marginInsets" => self.margin_insets.map(insets_value),
            "headerHeight" => self.header_height.map(Value::from),
            "tabStripHeight" => self.tab_strip_height.map(Value::from),
            "minWidth" => self.min_width.map(Value::from),
            "minHeight" => self.min_height.map(Value::from),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, v: &Value) {
        match name {
            "weight" => set_req(&mut self.weight, v, |v| as_f64(v).map(|w| w.max(0.0))),
            "width" => set_opt(&mut self.width, v, as_i32),
            "height" => set_opt(&mut self.height, v, as_i32),
            "selected" => {
                if let Some(s) = as_i32(v) {
                    self.selected = usize::try_from(s).ok();
                }
            }
            "name" => set_opt(&mut self.name, v, as_string),
            "enableDeleteWhenEmpty" => set_opt(&mut self.enable_delete_when_empty, v, as_bool),
            "enableDrop" => set_opt(&mut self.enable_drop, v, as_bool),
            "enableDrag" => set_opt(&mut self.enable_drag, v, as_bool),
            "enableDivide" => set_opt(&mut self.enable_divide, v, as_bool),
            "enableMaximize" => set_opt(&mut self.enable_maximize, v, as_bool),
            "enableTabStrip" => set_opt(&mut self.enable_tab_strip, v, as_bool),
            "classNameTabStrip" => set_opt(&mut self.class_name_tab_strip, v, as_string),
            "classNameHeader" => set_opt(&mut self.class_name_header, v, as_string),
            "borderInsets" => set_opt(&mut self.border_insets, v, as_insets),
            "marginInsets" => set_opt(&mut self.margin_insets, v, as_insets),
            "headerHeight" => set_opt(&mut self.header_height, v, as_i32),
            "tabStripHeight" => set_opt(&mut self.tab_strip_height, v, as_i32),
            "minWidth" => set_opt(&mut self.min_width, v, as_i32),
            "minHeight" => set_opt(&mut self.min_height, v, as_i32),
            _ => {}
        }
    }
}

/// Leaf holding an opaque content reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TabNode {
    pub(crate) name: String,
    pub(crate) component: Option<String>,
    pub(crate) config: Value,

    pub(crate) enable_close: Option<bool>,
    pub(crate) enable_drag: Option<bool>,
    pub(crate) enable_rename: Option<bool>,
    pub(crate) class_name: Option<String>,
    pub(crate) icon: Option<String>,
    pub(crate) enable_render_on_demand: Option<bool>,

    /// Header button rectangle inside the owning tab strip or border bar.
    pub(crate) tab_rect: Rect,
}

impl Default for TabNode {
    fn default() -> Self {
        Self {
            name: DEFAULT_TAB_NAME.to_owned(),
            component: None,
            config: Value::Null,
            enable_close: None,
            enable_drag: None,
            enable_rename: None,
            class_name: None,
            icon: None,
            enable_render_on_demand: None,
            tab_rect: Rect::empty(),
        }
    }
}

impl TabNode {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host-defined component key used to pick the tab's content.
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Opaque host configuration.
    #[must_use]
    pub fn config(&self) -> &Value {
        &self.config
    }

    #[must_use]
    pub fn tab_rect(&self) -> Rect {
        self.tab_rect
    }

    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name.clone())),
            "component" => self.component.clone().map(Value::from),
            "config" => (!self.config.is_null()).then(|| self.config.clone()),
            "enableClose" => self.enable_close.map(Value::from),
            "enableDrag" => self.enable_drag.map(Value::from),
            "enableRename" => self.enable_rename.map(Value::from),
            "className" => self.class_name.clone().map(Value::from),
            "icon" => self.icon.clone().map(Value::from),
            "enableRenderOnDemand" => self.enable_render_on_demand.map(Value::from),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, v: &Value) {
        match name {
            "name" => set_req(&mut self.name, v, as_string),
            "component" => set_opt(&mut self.component, v, as_string),
            "config" => self.config = v.clone(),
            "enableClose" => set_opt(&mut self.enable_close, v, as_bool),
            "enableDrag" => set_opt(&mut self.enable_drag, v, as_bool),
            "enableRename" => set_opt(&mut self.enable_rename, v, as_bool),
            "className" => set_opt(&mut self.class_name, v, as_string),
            "icon" => set_opt(&mut self.icon, v, as_string),
            "enableRenderOnDemand" => set_opt(&mut self.enable_render_on_demand, v, as_bool),
            _ => {}
        }
    }
}

/// Edge-docked tab collection living outside the root row.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderNode {
    pub(crate) location: DockLocation,
    /// Always a valid child index while the border has children.
    pub(crate) selected: Option<usize>,
    /// Whether the selected tab's panel is shown. Persisted as `selected: -1`
    /// when closed.
    pub(crate) open: bool,
    pub(crate) size: i32,
    pub(crate) show: bool,
    pub(crate) config: Value,

    pub(crate) bar_size: Option<i32>,
    pub(crate) enable_drop: Option<bool>,
    pub(crate) class_name: Option<String>,
    pub(crate) min_size: Option<i32>,

    pub(crate) tab_header_rect: Rect,
    pub(crate) content_rect: Rect,
    /// Panel size after shrinking to fit the layout rectangle.
    pub(crate) adjusted_size: i32,
    pub(crate) splitter: Option<NodeId>,
}

impl BorderNode {
    #[must_use]
    pub fn new(location: DockLocation) -> Self {
        Self {
            location,
            selected: None,
            open: false,
            size: DEFAULT_BORDER_SIZE,
            show: true,
            config: Value::Null,
            bar_size: None,
            enable_drop: None,
            class_name: None,
            min_size: None,
            tab_header_rect: Rect::empty(),
            content_rect: Rect::empty(),
            adjusted_size: DEFAULT_BORDER_SIZE,
            splitter: None,
        }
    }

    #[must_use]
    pub fn location(&self) -> DockLocation {
        self.location
    }

    /// Selected child index; meaningful for rendering only while open.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open && self.selected.is_some()
    }

    /// Configured panel thickness.
    #[must_use]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Panel thickness used by the last layout pass.
    #[must_use]
    pub fn adjusted_size(&self) -> i32 {
        self.adjusted_size
    }

    #[must_use]
    pub fn show(&self) -> bool {
        self.show
    }

    #[must_use]
    pub fn config(&self) -> &Value {
        &self.config
    }

    /// The bar holding the border's tab buttons.
    #[must_use]
    pub fn tab_header_rect(&self) -> Rect {
        self.tab_header_rect
    }

    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.content_rect
    }

    #[must_use]
    pub fn splitter(&self) -> Option<&NodeId> {
        self.splitter.as_ref()
    }

    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "location" => Some(Value::from(self.location.name())),
            "selected" => Some(match self.selected {
                Some(s) if self.open => json!(s),
                _ => json!(-1),
            }),
            "size" => Some(Value::from(self.size)),
            "show" => Some(Value::from(self.show)),
            "config" => (!self.config.is_null()).then(|| self.config.clone()),
            "barSize" => self.bar_size.map(Value::from),
            "enableDrop" => self.enable_drop.map(Value::from),
            "className" => self.class_name.clone().map(Value::from),
            "minSize" => self.min_size.map(Value::from),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, v: &Value) {
        match name {
            "selected" => {
                if let Some(s) = as_i32(v) {
                    match usize::try_from(s) {
                        Ok(index) => {
                            self.selected = Some(index);
                            self.open = true;
                        }
                        Err(_) => self.open = false,
                    }
                }
            }
            "size" => set_req(&mut self.size, v, |v| as_i32(v).map(|s| s.max(0))),
            "show" => set_req(&mut self.show, v, as_bool),
            "config" => self.config = v.clone(),
            "barSize" => set_opt(&mut self.bar_size, v, as_i32),
            "enableDrop" => set_opt(&mut self.enable_drop, v, as_bool),
            "className" => set_opt(&mut self.class_name, v, as_string),
            "minSize" => set_opt(&mut self.min_size, v, as_i32),
            _ => {}
        }
    }
}

/// Synthetic fixed-size divider between row children or beside an open
/// border panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterNode {
    /// Axis the splitter moves along when dragged.
    pub(crate) axis: Orientation,
}

impl SplitterNode {
    #[must_use]
    pub fn axis(&self) -> Orientation {
        self.axis
    }
}

/// Closed set of node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Row(RowNode),
    TabSet(TabSetNode),
    Tab(TabNode),
    Border(BorderNode),
    Splitter(SplitterNode),
}

impl NodeKind {
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Row(_) => NodeType::Row,
            Self::TabSet(_) => NodeType::TabSet,
            Self::Tab(_) => NodeType::Tab,
            Self::Border(_) => NodeType::Border,
            Self::Splitter(_) => NodeType::Splitter,
        }
    }
}

/// One arena record.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) rect: Rect,
    pub(crate) visible: bool,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            rect: Rect::empty(),
            visible: true,
            kind,
        }
    }

    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    #[must_use]
    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    /// Owned children in layout order. Splitters are not included.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Geometry from the last layout pass.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Splitters are fixed-size and excluded from weight distribution.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self.kind, NodeKind::Splitter(_))
    }

    #[must_use]
    pub fn as_row(&self) -> Option<&RowNode> {
        match &self.kind {
            NodeKind::Row(row) => Some(row),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tabset(&self) -> Option<&TabSetNode> {
        match &self.kind {
            NodeKind::TabSet(tabset) => Some(tabset),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tab(&self) -> Option<&TabNode> {
        match &self.kind {
            NodeKind::Tab(tab) => Some(tab),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_border(&self) -> Option<&BorderNode> {
        match &self.kind {
            NodeKind::Border(border) => Some(border),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_splitter(&self) -> Option<&SplitterNode> {
        match &self.kind {
            NodeKind::Splitter(splitter) => Some(splitter),
            _ => None,
        }
    }

    pub(crate) fn as_tabset_mut(&mut self) -> Option<&mut TabSetNode> {
        match &mut self.kind {
            NodeKind::TabSet(tabset) => Some(tabset),
            _ => None,
        }
    }

    pub(crate) fn as_tab_mut(&mut self) -> Option<&mut TabNode> {
        match &mut self.kind {
            NodeKind::Tab(tab) => Some(tab),
            _ => None,
        }
    }

    pub(crate) fn as_border_mut(&mut self) -> Option<&mut BorderNode> {
        match &mut self.kind {
            NodeKind::Border(border) => Some(border),
            _ => None,
        }
    }

    pub(crate) fn as_row_mut(&mut self) -> Option<&mut RowNode> {
        match &mut self.kind {
            NodeKind::Row(row) => Some(row),
            _ => None,
        }
    }

    /// Relative share of the parent row; zero for non-weighted nodes.
    #[must_use]
    pub fn weight(&self) -> f64 {
        match &self.kind {
            NodeKind::Row(row) => row.weight,
            NodeKind::TabSet(tabset) => tabset.weight,
            _ => 0.0,
        }
    }

    pub(crate) fn set_weight(&mut self, weight: f64) {
        let weight = weight.max(0.0);
        match &mut self.kind {
            NodeKind::Row(row) => row.weight = weight,
            NodeKind::TabSet(tabset) => tabset.weight = weight,
            _ => {}
        }
    }

    /// Explicit pixel size along `orientation`, if any.
    #[must_use]
    pub fn pref_size(&self, orientation: Orientation) -> Option<i32> {
        let (width, height) = match &self.kind {
            NodeKind::Row(row) => (row.width, row.height),
            NodeKind::TabSet(tabset) => (tabset.width, tabset.height),
            _ => (None, None),
        };
        match orientation {
            Orientation::Horz => width,
            Orientation::Vert => height,
        }
    }

    pub(crate) fn set_pref_size(&mut self, orientation: Orientation, pixels: i32) {
        let slot = match (&mut self.kind, orientation) {
            (NodeKind::Row(row), Orientation::Horz) => &mut row.width,
            (NodeKind::Row(row), Orientation::Vert) => &mut row.height,
            (NodeKind::TabSet(tabset), Orientation::Horz) => &mut tabset.width,
            (NodeKind::TabSet(tabset), Orientation::Vert) => &mut tabset.height,
            _ => return,
        };
        if slot.is_some() {
            *slot = Some(pixels.max(0));
        }
    }

    /// Selected child index of a tabset or border.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::TabSet(tabset) => tabset.selected,
            NodeKind::Border(border) => border.selected,
            _ => None,
        }
    }

    pub(crate) fn selected_mut(&mut self) -> Option<&mut Option<usize>> {
        match &mut self.kind {
            NodeKind::TabSet(tabset) => Some(&mut tabset.selected),
            NodeKind::Border(border) => Some(&mut border.selected),
            _ => None,
        }
    }

    /// Display name of a tab or tabset.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Tab(tab) => Some(&tab.name),
            NodeKind::TabSet(tabset) => tabset.name.as_deref(),
            _ => None,
        }
    }
}

impl AttributeTarget for Node {
    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "type" => return Some(Value::from(self.node_type().name())),
            "id" => return Some(Value::from(self.id.as_str())),
            _ => {}
        }
        match &self.kind {
            NodeKind::Row(row) => row.get(name),
            NodeKind::TabSet(tabset) => tabset.get(name),
            NodeKind::Tab(tab) => tab.get(name),
            NodeKind::Border(border) => border.get(name),
            NodeKind::Splitter(_) => None,
        }
    }

    /// `type`, `id` and a border's `location` are structural and only set by
    /// the loader.
    fn set(&mut self, name: &str, value: Value) {
        if matches!(name, "type" | "id") {
            return;
        }
        match &mut self.kind {
            NodeKind::Row(row) => row.set(name, &value),
            NodeKind::TabSet(tabset) => tabset.set(name, &value),
            NodeKind::Tab(tab) => tab.set(name, &value),
            NodeKind::Border(border) => border.set(name, &value),
            NodeKind::Splitter(_) => {}
        }
    }
}
