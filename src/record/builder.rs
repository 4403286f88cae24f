//! Flat record builder
//!
//! The insights payload nests one entry per metric:
//!
//! ```text
//! {"data": [{"name": "page_fans", "period": "days_28",
//!            "values": [{"value": 42, "end_time": "..."}]}]}
//! ```
//!
//! Each entry contributes `name → values[0].value` to a single flat record.
//! Only the first element of `values` is read.

use crate::types::{JsonObject, JsonValue};

/// Outcome of reading an insights payload
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// Flat record with one field per metric entry
    Ok(JsonObject),
    /// The API answered with an `error` object
    ApiError(JsonValue),
    /// The payload has neither usable `data` nor an `error`
    MalformedResponse(JsonValue),
}

impl FetchResult {
    /// Check if a record was built
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchResult::Ok(_))
    }
}

/// Reshape a raw insights payload into one flat record
pub fn build_record(raw: &JsonValue) -> FetchResult {
    let Some(data) = raw.get("data") else {
        return match raw.get("error") {
            Some(error) => FetchResult::ApiError(error.clone()),
            None => FetchResult::MalformedResponse(raw.clone()),
        };
    };

    let Some(entries) = data.as_array() else {
        return FetchResult::MalformedResponse(raw.clone());
    };

    let mut record = JsonObject::new();
    for entry in entries {
        match metric_value(entry) {
            Some((name, value)) => {
                record.insert(name.to_string(), value.clone());
            }
            None => return FetchResult::MalformedResponse(raw.clone()),
        }
    }

    FetchResult::Ok(record)
}

fn metric_value(entry: &JsonValue) -> Option<(&str, &JsonValue)> {
    let name = entry.get("name")?.as_str()?;
    let value = entry.get("values")?.as_array()?.first()?.get("value")?;
    Some((name, value))
}
