//! Engine types
//!
//! Singer messages and configuration for the sync engine.

use crate::record::Record;
use crate::schema::JsonSchema;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

/// A message written to the output stream
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Message {
    /// Stream schema, written before the stream's record
    Schema {
        /// Stream name (alias if set)
        stream: String,
        /// Stream schema
        schema: JsonSchema,
        /// Key properties
        key_properties: Vec<String>,
    },
    /// One record
    Record {
        /// Stream name (alias if set)
        stream: String,
        /// Record data
        record: Record,
        /// When the record was extracted
        time_extracted: DateTime<Utc>,
    },
}

impl Message {
    /// Create a schema message
    pub fn schema(
        stream: impl Into<String>,
        schema: JsonSchema,
        key_properties: Vec<String>,
    ) -> Self {
        Self::Schema {
            stream: stream.into(),
            schema,
            key_properties,
        }
    }

    /// Create a record message
    pub fn record(stream: impl Into<String>, record: Record) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: Utc::now(),
        }
    }

    /// Stream the message belongs to
    pub fn stream(&self) -> &str {
        match self {
            Self::Schema { stream, .. } | Self::Record { stream, .. } => stream,
        }
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a schema message
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

/// Options for a sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Date stamped into `date_extraction`
    pub extraction_date: NaiveDate,
    /// Whether to write a SCHEMA message before each stream's record
    pub emit_schema: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            extraction_date: Local::now().date_naive(),
            emit_schema: true,
        }
    }
}

impl SyncOptions {
    /// Create options for today's run
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extraction date
    #[must_use]
    pub fn with_extraction_date(mut self, date: NaiveDate) -> Self {
        self.extraction_date = date;
        self
    }

    /// Enable or disable SCHEMA messages
    #[must_use]
    pub fn with_schema_messages(mut self, emit: bool) -> Self {
        self.emit_schema = emit;
        self
    }
}

/// How a selected stream ended
#[derive(Debug, Clone, PartialEq)]
pub enum StreamOutcome {
    /// One record was written
    Emitted,
    /// The API returned an error object; nothing written
    ApiError(serde_json::Value),
    /// The payload could not be read; nothing written
    Malformed(serde_json::Value),
}

impl StreamOutcome {
    /// Check if a record was written
    pub fn is_emitted(&self) -> bool {
        matches!(self, Self::Emitted)
    }
}

/// Statistics from a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Streams selected in the catalog
    pub streams_selected: usize,
    /// Records written
    pub records_emitted: usize,
    /// Selected streams skipped because the payload had no data
    pub streams_skipped: usize,
    /// Per-stream outcome, in catalog order
    pub outcomes: Vec<(String, StreamOutcome)>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how a stream ended
    pub fn add_outcome(&mut self, stream: &str, outcome: StreamOutcome) {
        if outcome.is_emitted() {
            self.records_emitted += 1;
        } else {
            self.streams_skipped += 1;
        }
        self.outcomes.push((stream.to_string(), outcome));
    }

    /// Outcome for one stream
    pub fn outcome(&self, stream: &str) -> Option<&StreamOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == stream)
            .map(|(_, outcome)| outcome)
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
