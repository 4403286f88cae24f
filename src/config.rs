//! Tap configuration
//!
//! The configuration file is a flat JSON object. Four keys are required
//! (`access_token`, `page_id`, `start_date`, `end_date`); the rest tune how
//! the Graph API is reached and fall back to defaults.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Keys that must be present in every configuration
pub const REQUIRED_CONFIG_KEYS: [&str; 4] = ["access_token", "page_id", "start_date", "end_date"];

// ============================================================================
// Tap Config
// ============================================================================

/// Resolved tap configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// Page access token
    pub access_token: String,

    /// Facebook page id
    pub page_id: String,

    /// Start of the insights window (sent as `since`)
    pub start_date: String,

    /// End of the insights window (sent as `until`)
    pub end_date: String,

    /// Graph API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Graph API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_api_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_api_version() -> String {
    "v3.2".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl TapConfig {
    /// Build a config from the four required values, defaults for the rest
    pub fn new(
        access_token: impl Into<String>,
        page_id: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            page_id: page_id.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            api_base_url: default_api_base_url(),
            api_version: default_api_version(),
            request_timeout_seconds: default_timeout(),
            user_agent: None,
        }
    }

    /// Point the config at a different API host
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(path.display().to_string())
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_json(&content)
    }

    /// Load configuration from inline JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Build configuration from a parsed JSON value
    ///
    /// Required keys are checked before deserializing so the error names the
    /// first missing key.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::config("Config must be a JSON object"))?;

        if let Some(missing) = REQUIRED_CONFIG_KEYS
            .iter()
            .find(|key| !object.contains_key(**key))
        {
            return Err(Error::missing_field(*missing));
        }

        let config: TapConfig = serde_json::from_value(value)
            .map_err(|e| Error::config(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("access_token", &self.access_token),
            ("page_id", &self.page_id),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::invalid_value(field, "must not be empty"));
            }
        }
        if self.request_timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "request_timeout_seconds",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapConfig")
            .field("access_token", &"[redacted]")
            .field("page_id", &self.page_id)
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
