//! State document
//!
//! The tap re-syncs the configured window on every run, so state is read and
//! carried along but never consulted or written.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// State passed in with `--state`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(JsonValue);

impl State {
    /// Create an empty state
    pub fn new() -> Self {
        Self(JsonValue::Object(serde_json::Map::new()))
    }

    /// Load state from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::State {
            message: format!("Failed to read state file '{}': {e}", path.display()),
        })?;
        Self::from_json(&contents)
    }

    /// Parse state from inline JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json).map_err(|e| Error::State {
            message: format!("Failed to parse state JSON: {e}"),
        })?;
        if !value.is_object() {
            return Err(Error::state("State must be a JSON object"));
        }
        Ok(Self(value))
    }

    /// Check if the state carries no keys
    pub fn is_empty(&self) -> bool {
        self.0.as_object().map_or(true, serde_json::Map::is_empty)
    }

    /// Raw state document
    pub fn as_json(&self) -> &JsonValue {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_default() {
        assert!(State::new().is_empty());
        assert!(State::default().is_empty());
    }

    #[test]
    fn test_state_from_json() {
        let state = State::from_json(r#"{"bookmarks": {"page_fans": "2019-01-01"}}"#).unwrap();
        assert!(!state.is_empty());
        assert_eq!(state.as_json()["bookmarks"]["page_fans"], json!("2019-01-01"));

        assert!(State::from_json("[]").is_err());
        assert!(State::from_json("{").is_err());
    }

    #[test]
    fn test_state_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(State::from_file(&path).unwrap().is_empty());

        let err = State::from_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::State { .. }));
    }
}
