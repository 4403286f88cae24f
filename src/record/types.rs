//! Record types
//!
//! Typed values produced by the transformer and the records they make up.

use crate::types::JsonValue;
use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Field added to every emitted record with the run date
pub const DATE_EXTRACTION_FIELD: &str = "date_extraction";

/// Output format for date-time values
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Output format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A schema-checked field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    /// Nested value passed through without validation
    Raw(JsonValue),
}

impl FieldValue {
    /// Convert to JSON value
    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Null => JsonValue::Null,
            FieldValue::Boolean(b) => JsonValue::Bool(*b),
            FieldValue::Integer(i) => JsonValue::from(*i),
            FieldValue::Number(n) => JsonValue::from(*n),
            FieldValue::String(s) => JsonValue::String(s.clone()),
            FieldValue::Date(d) => JsonValue::String(d.format(DATE_FORMAT).to_string()),
            FieldValue::DateTime(dt) => JsonValue::String(dt.format(DATETIME_FORMAT).to_string()),
            FieldValue::Raw(value) => value.clone(),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// One emission-ready record
///
/// Fields keep insertion order, so metrics come out in the order the API
/// listed them with `date_extraction` last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value in place
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Get a field
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name, value))
    }

    /// Stamp the record with the extraction date
    pub fn set_date_extraction(&mut self, date: NaiveDate) {
        self.insert(DATE_EXTRACTION_FIELD, FieldValue::Date(date));
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
