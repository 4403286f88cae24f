//! Schema directory loader
//!
//! Every `*.json` file in the schema directory is one stream; the file stem
//! is the stream name.

use super::types::{Catalog, CatalogEntry};
use crate::error::{Error, Result};
use crate::schema::JsonSchema;
use crate::types::JsonValue;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load all schemas from a directory, sorted by stream name
pub fn load_schemas(dir: impl AsRef<Path>) -> Result<Vec<(String, JsonSchema)>> {
    let dir = dir.as_ref();
    let read_dir = fs::read_dir(dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(dir.display().to_string())
        } else {
            Error::Io(e)
        }
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in read_dir {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        } else {
            debug!("Skipping non-schema entry {}", path.display());
        }
    }
    paths.sort();

    paths.iter().map(|path| load_schema_file(path)).collect()
}

fn load_schema_file(path: &Path) -> Result<(String, JsonSchema)> {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .ok_or_else(|| Error::catalog(format!("Invalid schema path: {}", path.display())))?;

    let content = fs::read_to_string(path)?;
    let value: JsonValue = serde_json::from_str(&content)
        .map_err(|e| Error::schema(&name, format!("invalid JSON: {e}")))?;
    let schema = JsonSchema::from_value(&name, value)?;

    debug!("Loaded schema for stream {name}");
    Ok((name, schema))
}

/// Build the discovery catalog from a schema directory
///
/// Entries start with no metadata and no key properties, so nothing is
/// selected until the caller edits the catalog.
pub fn discover(schemas_dir: impl AsRef<Path>) -> Result<Catalog> {
    let streams = load_schemas(schemas_dir)?
        .into_iter()
        .map(|(name, schema)| CatalogEntry::new(name, schema))
        .collect();
    Ok(Catalog { streams })
}
