//! Parsed configuration documents
//!
//! `sink.toml` and its fragments are parsed with `toml` and held as
//! `serde_json` values, so the merged result can be dumped as JSON as-is.

use serde::Serialize;
use serde_json::{Map, Value};

/// Top-level key listing include glob patterns
pub const INCLUDE_KEY: &str = "include";

/// Top-level key holding dish settings
pub const DISH_KEY: &str = "dish";

/// Top-level key holding bar geometry
pub const LAYOUT_KEY: &str = "layout";

/// Layout keys the bar reads to place dishes
const MODULE_SLOTS: &[(&str, &str)] = &[
    ("left", "modules_left"),
    ("center", "modules_center"),
    ("right", "modules_right"),
];

/// A configuration document: the root file, a fragment, or a merge result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SinkConfig {
    root: Map<String, Value>,
}

impl SinkConfig {
    pub fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let table: toml::Table = toml::from_str(contents)?;
        let root = table
            .into_iter()
            .map(|(k, v)| (k, toml_to_json(v)))
            .collect();
        Ok(Self { root })
    }

    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.root
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Raw `include` value, if any
    pub fn includes(&self) -> Option<&Value> {
        self.root.get(INCLUDE_KEY)
    }

    /// True when there is nothing to include
    ///
    /// Absent, empty array, and other "empty" values (`""`, `{}`) all count.
    pub fn has_no_includes(&self) -> bool {
        match self.includes() {
            None | Some(Value::Null) => true,
            Some(Value::Array(items)) => items.is_empty(),
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Object(map)) => map.is_empty(),
            Some(_) => false,
        }
    }

    pub fn dish(&self) -> Option<&Map<String, Value>> {
        self.root.get(DISH_KEY).and_then(Value::as_object)
    }

    /// Dish names in document order
    pub fn dish_names(&self) -> Vec<&str> {
        self.dish()
            .map(|d| d.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn layout(&self) -> Option<&Map<String, Value>> {
        self.root.get(LAYOUT_KEY).and_then(Value::as_object)
    }

    /// `layout.width` rendered for display
    pub fn layout_width(&self) -> Option<String> {
        self.layout()
            .and_then(|l| l.get("width"))
            .map(display_value)
    }

    /// Dish placement per bar section, for sections the layout declares
    pub fn layout_modules(&self) -> Vec<(&'static str, Vec<String>)> {
        let Some(layout) = self.layout() else {
            return Vec::new();
        };

        MODULE_SLOTS
            .iter()
            .filter_map(|(section, key)| {
                let items = layout.get(*key)?.as_array()?;
                Some((*section, items.iter().map(display_value).collect()))
            })
            .collect()
    }

    /// Serialize as indented JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Convert a TOML value into a JSON value
pub fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Render a value the way a user wrote it: strings unquoted, the rest as JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
