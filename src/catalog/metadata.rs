//! Breadcrumb metadata
//!
//! Catalog metadata travels as a list of `{breadcrumb, metadata}` entries. An
//! empty breadcrumb annotates the whole stream, `["properties", field]`
//! annotates a single field.

use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Path to the part of a stream an annotation applies to
pub type Breadcrumb = Vec<String>;

/// Stream-level selection flag
pub const SELECTED: &str = "selected";

/// Field-level flag marking a non-metric field
pub const DIMENSION: &str = "dimension";

/// Breadcrumb for a top-level schema property
pub fn field_breadcrumb(field: &str) -> Breadcrumb {
    vec!["properties".to_string(), field.to_string()]
}

/// One metadata entry as it appears in a catalog document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Where the annotations apply
    #[serde(default)]
    pub breadcrumb: Breadcrumb,

    /// Key/value annotations
    #[serde(default)]
    pub metadata: JsonObject,
}

/// Breadcrumb-indexed view of a stream's metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataMap {
    entries: BTreeMap<Breadcrumb, JsonObject>,
}

impl MetadataMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a list of entries; a repeated breadcrumb replaces the earlier one
    pub fn from_entries(entries: &[MetadataEntry]) -> Self {
        let entries = entries
            .iter()
            .map(|entry| (entry.breadcrumb.clone(), entry.metadata.clone()))
            .collect();
        Self { entries }
    }

    /// Look up one annotation
    pub fn get(&self, breadcrumb: &[String], key: &str) -> Option<&JsonValue> {
        self.entries.get(breadcrumb)?.get(key)
    }

    /// Look up a stream-level annotation
    pub fn stream_value(&self, key: &str) -> Option<&JsonValue> {
        self.get(&[], key)
    }

    /// Look up a field-level annotation
    pub fn field_value(&self, field: &str, key: &str) -> Option<&JsonValue> {
        self.get(&field_breadcrumb(field), key)
    }

    /// Set one annotation
    pub fn write(&mut self, breadcrumb: Breadcrumb, key: &str, value: JsonValue) {
        self.entries
            .entry(breadcrumb)
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Check if there are no annotations
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert back to catalog entries
    pub fn to_entries(&self) -> Vec<MetadataEntry> {
        self.entries
            .iter()
            .map(|(breadcrumb, metadata)| MetadataEntry {
                breadcrumb: breadcrumb.clone(),
                metadata: metadata.clone(),
            })
            .collect()
    }
}
