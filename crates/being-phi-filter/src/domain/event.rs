//! Analytics event model
//!
//! Events are built by call sites right before a tracking call and dropped
//! right after validation. They carry no identity and are never stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Property bag of an analytics event.
///
/// Ordered by key so that scans (and the reason they report) are reproducible.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A single property value.
///
/// Only the scalar variants are legal payload. `Unsupported` keeps any other
/// JSON shape (null, array, object) around so the filter can reject it
/// instead of losing it during deserialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Unsupported(serde_json::Value),
}

impl PropertyValue {
    /// Whether this value is a string, number or boolean
    pub fn is_scalar(&self) -> bool {
        !matches!(self, PropertyValue::Unsupported(_))
    }

    /// Whether this value is a number
    pub fn is_numeric(&self) -> bool {
        matches!(self, PropertyValue::Integer(_) | PropertyValue::Float(_))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(x) => write!(f, "{}", x),
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::Unsupported(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer(i64::from(value))
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Integer(i64::from(value))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => PropertyValue::Bool(b),
            serde_json::Value::String(s) => PropertyValue::Text(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Integer(i),
                None => match n.as_f64() {
                    Some(x) => PropertyValue::Float(x),
                    None => PropertyValue::Unsupported(serde_json::Value::Number(n)),
                },
            },
            other => PropertyValue::Unsupported(other),
        }
    }
}

/// A proposed analytics event
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Identifier of the user action, e.g. `screen_viewed`
    pub name: String,
    /// Top-level scalar properties
    #[serde(default)]
    pub properties: Properties,
}

impl AnalyticsEvent {
    /// Create an event with no properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Properties::new(),
        }
    }

    /// Builder-style method to add a property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Parse an event from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
