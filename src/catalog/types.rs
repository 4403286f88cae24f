//! Catalog types
//!
//! The catalog is exchanged between discovery and sync: discovery prints it,
//! the caller marks streams as selected, and sync reads it back.

use super::metadata::{field_breadcrumb, MetadataEntry, MetadataMap, DIMENSION, SELECTED};
use crate::error::{Error, Result};
use crate::schema::JsonSchema;
use crate::types::{JsonValue, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered list of streams
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Available streams
    #[serde(default)]
    pub streams: Vec<CatalogEntry>,
}

/// Stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stream name
    #[serde(default)]
    pub stream: String,

    /// Unique stream identifier
    pub tap_stream_id: String,

    /// JSON schema for the stream
    pub schema: JsonSchema,

    /// Breadcrumb metadata
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,

    /// Key properties (always empty for insights streams)
    #[serde(default)]
    pub key_properties: Vec<String>,

    /// Name to emit records under instead of the stream id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_alias: Option<String>,
}

impl CatalogEntry {
    /// Create an entry for a freshly discovered schema
    pub fn new(name: impl Into<String>, schema: JsonSchema) -> Self {
        let name = name.into();
        Self {
            stream: name.clone(),
            tap_stream_id: name,
            schema,
            metadata: Vec::new(),
            key_properties: Vec::new(),
            stream_alias: None,
        }
    }

    /// Breadcrumb-indexed metadata
    pub fn metadata_map(&self) -> MetadataMap {
        MetadataMap::from_entries(&self.metadata)
    }

    /// Whether the stream-level metadata has `selected: true`
    ///
    /// Anything other than a JSON `true` (absent, `false`, `"true"`) leaves the
    /// stream unselected. A `selected` key inside the schema is not consulted.
    pub fn is_selected(&self) -> bool {
        matches!(
            self.metadata_map().stream_value(SELECTED),
            Some(JsonValue::Bool(true))
        )
    }

    /// Name records are emitted under
    pub fn output_name(&self) -> &str {
        self.stream_alias.as_deref().unwrap_or(&self.tap_stream_id)
    }

    /// Mark the stream as selected or not
    pub fn set_selected(&mut self, selected: bool) {
        self.write_metadata(Vec::new(), SELECTED, JsonValue::Bool(selected));
    }

    /// Mark a field as a dimension
    pub fn set_dimension(&mut self, field: &str, dimension: bool) {
        self.write_metadata(field_breadcrumb(field), DIMENSION, JsonValue::Bool(dimension));
    }

    fn write_metadata(&mut self, breadcrumb: Vec<String>, key: &str, value: JsonValue) {
        let mut map = self.metadata_map();
        map.write(breadcrumb, key, value);
        self.metadata = map.to_entries();
    }
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(path.display().to_string())
            } else {
                Error::catalog(format!(
                    "Failed to read catalog file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_json(&content)
    }

    /// Parse a catalog document
    pub fn from_json(json: &str) -> Result<Self> {
        let mut catalog: Catalog = serde_json::from_str(json)
            .map_err(|e| Error::catalog(format!("Invalid catalog JSON: {e}")))?;

        for entry in &mut catalog.streams {
            if entry.stream.is_empty() {
                entry.stream.clone_from(&entry.tap_stream_id);
            }
            entry.stream_alias = entry.stream_alias.take().none_if_empty();
        }

        Ok(catalog)
    }

    /// Find a stream by id
    pub fn get_stream(&self, tap_stream_id: &str) -> Option<&CatalogEntry> {
        self.streams
            .iter()
            .find(|entry| entry.tap_stream_id == tap_stream_id)
    }

    /// Find a stream by id for editing
    pub fn get_stream_mut(&mut self, tap_stream_id: &str) -> Result<&mut CatalogEntry> {
        self.streams
            .iter_mut()
            .find(|entry| entry.tap_stream_id == tap_stream_id)
            .ok_or_else(|| Error::StreamNotFound {
                stream: tap_stream_id.to_string(),
            })
    }

    /// Ids of the selected streams, in catalog order
    pub fn selected_stream_ids(&self) -> Vec<&str> {
        self.streams
            .iter()
            .filter(|entry| entry.is_selected())
            .map(|entry| entry.tap_stream_id.as_str())
            .collect()
    }

    /// Pretty JSON as printed by discovery
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
