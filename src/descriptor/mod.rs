//! Descriptor values and templates
//!
//! A descriptor is the structured, serializable configuration object being
//! edited: a data package, a single resource, or a detector configuration.
//! The core treats descriptors as opaque JSON objects beyond the fields it
//! directly manipulates, so unknown fields survive every edit verbatim.
//!
//! # Main Types
//!
//! - [`Descriptor`] - A string-keyed JSON object with shallow-merge editing
//! - [`ExportFormat`] - Serialization format for import/export
//!
//! Templates for fresh edit sessions ([`Descriptor::initial_package`] and
//! friends) carry the same defaults the editor UI offers when the user
//! creates an entity from scratch.

pub mod format;

pub use format::ExportFormat;

use crate::settings;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A structured descriptor: a mapping from string keys to JSON values.
///
/// `Clone` performs a deep copy; descriptors have no shared substructure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor(Map<String, Value>);

impl Descriptor {
    /// Create an empty descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, returning `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// View the descriptor as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Consume the descriptor into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Consume the descriptor into its underlying map
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Get a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a top-level field, returning the previous value if any
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Remove a top-level field
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Shallow-merge `patch` onto this descriptor.
    ///
    /// Top-level keys only: a nested structure in `patch` replaces the
    /// existing value for that key wholesale.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            self.0.insert(key, value);
        }
    }

    /// The `name` field as a string, empty when absent or not a string
    pub fn name(&self) -> &str {
        self.get("name").and_then(Value::as_str).unwrap_or("")
    }

    /// Iterate over the descriptor's top-level fields
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the descriptor has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // ── Templates ──

    /// Template for a fresh data package session
    pub fn initial_package() -> Self {
        Self::from_value(json!({
            "name": "package",
            "resources": [],
            "licenses": [],
        }))
        .unwrap()
    }

    /// Template for a newly added resource; `count` is the current number
    /// of resources in the collection and seeds the generated name.
    pub fn initial_resource(count: usize) -> Self {
        Self::from_value(json!({
            "name": format!("resource{count}"),
            "type": settings::DEFAULT_RESOURCE_TYPE,
            "path": settings::DEFAULT_RESOURCE_PATH,
        }))
        .unwrap()
    }

    /// Template for a newly added license
    pub fn initial_license() -> Self {
        Self::from_value(json!({
            "name": settings::DEFAULT_LICENSE_NAME,
        }))
        .unwrap()
    }

    /// Template for a fresh detector session
    pub fn initial_detector() -> Self {
        Self::from_value(json!({
            "bufferSize": settings::DEFAULT_BUFFER_SIZE,
            "sampleSize": settings::DEFAULT_SAMPLE_SIZE,
            "fieldType": "",
            "fieldNames": [],
            "fieldConfidence": settings::DEFAULT_FIELD_CONFIDENCE,
            "fieldFloatNumbers": false,
            "schemaSync": false,
        }))
        .unwrap()
    }
}

impl From<Map<String, Value>> for Descriptor {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
