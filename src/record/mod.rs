//! Record module
//!
//! Turns raw insights payloads into emission-ready records.
//!
//! # Overview
//!
//! - `build_record` - Flattens the per-metric payload into one record
//! - `FetchResult` - Separates data, API error objects and unusable payloads
//! - `Transformer` - Coerces the flat record against the stream schema
//! - `Record` / `FieldValue` - Typed output values

mod builder;
mod transform;
mod types;

pub use builder::{build_record, FetchResult};
pub use transform::{parse_datetime, Transformer};
pub use types::{FieldValue, Record, DATETIME_FORMAT, DATE_EXTRACTION_FIELD, DATE_FORMAT};
