//! Schema-driven value coercion
//!
//! Converts a flat JSON record into typed [`FieldValue`]s according to the
//! stream schema. Fields the schema does not declare are dropped. A value that
//! none of its declared types accepts is an error.

use super::types::{FieldValue, Record};
use crate::error::{Error, Result};
use crate::schema::{JsonSchema, JsonType, SchemaProperty, StringFormat};
use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

/// Record transformer
///
/// Integers in `date-time` fields are read as milliseconds since the epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer;

impl Transformer {
    /// Coerce every declared field of `record` against `schema`
    pub fn transform(
        &self,
        stream: &str,
        record: &JsonObject,
        schema: &JsonSchema,
    ) -> Result<Record> {
        let mut output = Record::new();

        for (field, value) in record {
            let Some(property) = schema.get_property(field) else {
                debug!(stream, field = %field, "Dropping field not declared in schema");
                continue;
            };

            let coerced = self.coerce(value, property).ok_or_else(|| {
                Error::transform(
                    stream,
                    field.as_str(),
                    format!("{value} does not match {}", describe_types(property)),
                )
            })?;
            output.insert(field.clone(), coerced);
        }

        Ok(output)
    }

    /// Coerce one value, `None` when no declared type accepts it
    pub fn coerce(&self, value: &JsonValue, property: &SchemaProperty) -> Option<FieldValue> {
        let types = property.types();
        if types.is_empty() {
            return Some(FieldValue::Raw(value.clone()));
        }

        if value.is_null() {
            return property.is_nullable().then_some(FieldValue::Null);
        }

        types
            .iter()
            .filter(|t| **t != JsonType::Null)
            .find_map(|t| coerce_as(value, *t, property.string_format()))
    }
}

fn coerce_as(
    value: &JsonValue,
    json_type: JsonType,
    format: Option<StringFormat>,
) -> Option<FieldValue> {
    match json_type {
        JsonType::Integer => to_integer(value).map(FieldValue::Integer),
        JsonType::Number => to_number(value).map(FieldValue::Number),
        JsonType::Boolean => to_boolean(value).map(FieldValue::Boolean),
        JsonType::String => match format {
            Some(StringFormat::DateTime) => to_datetime(value).map(FieldValue::DateTime),
            Some(StringFormat::Date) => to_date(value).map(FieldValue::Date),
            None => to_string(value).map(FieldValue::String),
        },
        JsonType::Object => value.is_object().then(|| FieldValue::Raw(value.clone())),
        JsonType::Array => value.is_array().then(|| FieldValue::Raw(value.clone())),
        JsonType::Null => None,
    }
}

fn to_datetime(value: &JsonValue) -> Option<DateTime<Utc>> {
    match value {
        JsonValue::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        JsonValue::String(s) => parse_datetime(s),
        _ => None,
    }
}

fn to_integer(value: &JsonValue) -> Option<i64> {
    match value {
        // Floats truncate toward zero; 2^63 and above do not fit
        JsonValue::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?.trunc();
            (f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
        }),
        JsonValue::String(s) => s.replace(',', "").trim().parse().ok(),
        _ => None,
    }
}

fn to_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s
            .replace(',', "")
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite()),
        _ => None,
    }
}

fn to_boolean(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) => Some(s.trim().eq_ignore_ascii_case("true")),
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

fn to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn to_date(value: &JsonValue) -> Option<NaiveDate> {
    let s = value.as_str()?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(s).map(|dt| dt.date_naive()))
}

/// Parse the date-time shapes the Graph API and catalogs use
///
/// Offsets may be written `+00:00` or `+0000`; strings without an offset are
/// taken as UTC, and a bare date is midnight UTC.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn describe_types(property: &SchemaProperty) -> String {
    let types: Vec<String> = property.types().iter().map(ToString::to_string).collect();
    match &property.format {
        Some(format) => format!("type {} (format {format})", types.join("|")),
        None => format!("type {}", types.join("|")),
    }
}
