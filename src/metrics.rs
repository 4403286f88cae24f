//! Metric classification
//!
//! Every top-level schema property is requested from the insights API as a
//! metric, except fields marked `dimension: true` in field metadata and the
//! reserved `date` field.

use crate::catalog::{CatalogEntry, DIMENSION};
use crate::types::JsonValue;
use tracing::info;

/// Field name that is never requested as a metric
pub const RESERVED_DATE_FIELD: &str = "date";

/// Result of splitting a stream's properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricSelection {
    /// Metric names in schema declaration order
    pub metrics: Vec<String>,
    /// Dimensions and reserved fields, in declaration order
    pub excluded: Vec<String>,
}

impl MetricSelection {
    /// Comma-joined metric list for the `metric` query parameter
    pub fn joined(&self) -> String {
        self.metrics.join(",")
    }

    /// Check if there are no metrics to request
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Split a stream's schema properties into metrics and excluded fields
pub fn classify(entry: &CatalogEntry) -> MetricSelection {
    let metadata = entry.metadata_map();
    let mut selection = MetricSelection::default();

    for field in entry.schema.property_names() {
        let is_dimension = matches!(
            metadata.field_value(field, DIMENSION),
            Some(JsonValue::Bool(true))
        );
        if is_dimension || field == RESERVED_DATE_FIELD {
            selection.excluded.push(field.to_string());
        } else {
            selection.metrics.push(field.to_string());
        }
    }

    info!(
        stream = %entry.tap_stream_id,
        metrics = ?selection.metrics,
        excluded = ?selection.excluded,
        "Getting metrics"
    );
    selection
}
