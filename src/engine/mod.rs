//! Sync engine module
//!
//! Walks the catalog and turns each selected stream into one record.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Runs selected streams one after another
//! - `SyncOptions` - Extraction date and SCHEMA message toggle
//! - `Message` - Singer SCHEMA and RECORD messages
//! - `RecordSink` - Where messages are written (stdout or memory)
//!
//! # Per-stream flow
//!
//! ```text
//! classify → fetch → build → transform → SCHEMA → RECORD
//!                     └── api error / malformed → warn, skip
//! ```
//!
//! A skipped stream writes nothing. Transport failures and coercion
//! mismatches abort the run. There are no retries and no state carried
//! between streams.

mod sink;
mod types;

pub use sink::{JsonLinesSink, MemorySink, RecordSink};
pub use types::{Message, StreamOutcome, SyncOptions, SyncStats};

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::Result;
use crate::insights::InsightsSource;
use crate::metrics::classify;
use crate::record::{build_record, FetchResult, Transformer};
use crate::state::State;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for page insights streams
pub struct SyncEngine<S: InsightsSource> {
    /// Insights source
    source: S,
    /// Run options
    options: SyncOptions,
    /// Statistics
    stats: SyncStats,
}

impl<S: InsightsSource> SyncEngine<S> {
    /// Create a new sync engine
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: SyncOptions::default(),
            stats: SyncStats::default(),
        }
    }

    /// Set run options
    #[must_use]
    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Get the insights source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sync every selected stream in catalog order
    pub async fn sync(
        &mut self,
        catalog: &Catalog,
        state: Option<&State>,
        sink: &mut dyn RecordSink,
    ) -> Result<SyncStats> {
        let start = Instant::now();
        self.stats = SyncStats::new();

        if let Some(state) = state.filter(|s| !s.is_empty()) {
            debug!(state = %state.as_json(), "Ignoring state, every run re-syncs the window");
        }

        for entry in &catalog.streams {
            if !entry.is_selected() {
                debug!(stream = %entry.tap_stream_id, "Skipping unselected stream");
                continue;
            }
            self.stats.streams_selected += 1;

            let outcome = self.sync_stream(entry, sink).await?;
            self.stats.add_outcome(&entry.tap_stream_id, outcome);
        }

        #[allow(clippy::cast_possible_truncation)]
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            streams_selected = self.stats.streams_selected,
            records_emitted = self.stats.records_emitted,
            streams_skipped = self.stats.streams_skipped,
            duration_ms = self.stats.duration_ms,
            "Sync complete"
        );

        Ok(self.stats.clone())
    }

    /// Sync a single stream
    pub async fn sync_stream(
        &self,
        entry: &CatalogEntry,
        sink: &mut dyn RecordSink,
    ) -> Result<StreamOutcome> {
        let stream = entry.tap_stream_id.as_str();
        let output_name = entry.output_name();
        info!(stream, "Syncing stream");

        let metrics = classify(entry);
        let raw = self.source.fetch(&metrics).await?;

        let data = match build_record(&raw) {
            FetchResult::Ok(data) => data,
            FetchResult::ApiError(error) => {
                warn!(stream, error = %error, "Insights API returned an error, skipping stream");
                return Ok(StreamOutcome::ApiError(error));
            }
            FetchResult::MalformedResponse(payload) => {
                warn!(stream, payload = %payload, "Unreadable insights payload, skipping stream");
                return Ok(StreamOutcome::Malformed(payload));
            }
        };

        let mut record = Transformer.transform(stream, &data, &entry.schema)?;
        record.set_date_extraction(self.options.extraction_date);

        if self.options.emit_schema {
            sink.write_message(&Message::schema(
                output_name,
                entry.schema.clone(),
                entry.key_properties.clone(),
            ))?;
        }

        sink.write_message(&Message::record(output_name, record))?;
        info!(stream, fields = data.len(), "Emitted record");

        Ok(StreamOutcome::Emitted)
    }
}
