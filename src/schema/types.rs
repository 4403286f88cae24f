//! Schema types

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonType::String => write!(f, "string"),
            JsonType::Number => write!(f, "number"),
            JsonType::Integer => write!(f, "integer"),
            JsonType::Boolean => write!(f, "boolean"),
            JsonType::Object => write!(f, "object"),
            JsonType::Array => write!(f, "array"),
            JsonType::Null => write!(f, "null"),
        }
    }
}

/// JSON type can be a single type or array of types (for nullable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonTypeOrArray {
    Single(JsonType),
    Multiple(Vec<JsonType>),
}

impl JsonTypeOrArray {
    /// All declared types, in declaration order
    pub fn types(&self) -> &[JsonType] {
        match self {
            JsonTypeOrArray::Single(t) => std::slice::from_ref(t),
            JsonTypeOrArray::Multiple(types) => types,
        }
    }

    /// Check if this type is nullable
    pub fn is_nullable(&self) -> bool {
        self.types().contains(&JsonType::Null)
    }
}

/// Format hint attached to a string property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    /// `date-time`
    DateTime,
    /// `date`
    Date,
}

impl StringFormat {
    /// Parse a JSON-schema format keyword
    pub fn parse(format: &str) -> Option<Self> {
        match format {
            "date-time" => Some(StringFormat::DateTime),
            "date" => Some(StringFormat::Date),
            _ => None,
        }
    }
}

/// JSON Schema property definition
///
/// Only the keywords the transformer acts on are kept; everything else stays
/// in the raw document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaProperty {
    /// Property type(s)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub json_type: Option<JsonTypeOrArray>,

    /// Format hint (e.g., "date-time")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SchemaProperty {
    /// Create a new property with the given type
    pub fn new(json_type: JsonType) -> Self {
        Self {
            json_type: Some(JsonTypeOrArray::Single(json_type)),
            ..Self::default()
        }
    }

    /// Create a nullable property
    pub fn nullable(json_type: JsonType) -> Self {
        Self {
            json_type: Some(JsonTypeOrArray::Multiple(vec![JsonType::Null, json_type])),
            ..Self::default()
        }
    }

    /// Set format hint
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Declared types, empty when the property carries no `type`
    pub fn types(&self) -> &[JsonType] {
        match &self.json_type {
            Some(json_type) => json_type.types(),
            None => &[],
        }
    }

    /// Check if nullable
    pub fn is_nullable(&self) -> bool {
        self.json_type
            .as_ref()
            .is_some_and(JsonTypeOrArray::is_nullable)
    }

    /// Recognised string format, if any
    pub fn string_format(&self) -> Option<StringFormat> {
        self.format.as_deref().and_then(StringFormat::parse)
    }
}

/// Stream schema document
///
/// Holds the document exactly as loaded (so it can be written back into a
/// catalog untouched) together with a typed, declaration-ordered view of its
/// top-level properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JsonValue", into = "JsonValue")]
pub struct JsonSchema {
    raw: JsonObject,
    properties: Vec<(String, SchemaProperty)>,
}

impl JsonSchema {
    /// Parse a schema document, naming it in any error
    pub fn from_value(name: &str, value: JsonValue) -> Result<Self> {
        Self::try_from(value).map_err(|message| Error::schema(name, message))
    }

    /// Build a schema from typed properties
    pub fn from_properties<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaProperty)>,
        S: Into<String>,
    {
        let properties: Vec<(String, SchemaProperty)> = properties
            .into_iter()
            .map(|(name, property)| (name.into(), property))
            .collect();

        let mut props = JsonObject::new();
        for (name, property) in &properties {
            props.insert(
                name.clone(),
                serde_json::to_value(property).unwrap_or_default(),
            );
        }

        let mut raw = JsonObject::new();
        raw.insert("type".to_string(), JsonValue::from("object"));
        raw.insert("properties".to_string(), JsonValue::Object(props));

        Self { raw, properties }
    }

    /// Property names in declaration order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }

    /// Properties in declaration order
    pub fn properties(&self) -> &[(String, SchemaProperty)] {
        &self.properties
    }

    /// Get a property
    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties
            .iter()
            .find(|(prop, _)| prop == name)
            .map(|(_, property)| property)
    }

    /// The document as loaded
    pub fn as_object(&self) -> &JsonObject {
        &self.raw
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.raw.clone())
    }
}

impl TryFrom<JsonValue> for JsonSchema {
    type Error = String;

    fn try_from(value: JsonValue) -> std::result::Result<Self, Self::Error> {
        let JsonValue::Object(raw) = value else {
            return Err("schema must be a JSON object".to_string());
        };

        let properties = match raw.get("properties") {
            None => Vec::new(),
            Some(JsonValue::Object(props)) => props
                .iter()
                .map(|(name, prop)| {
                    serde_json::from_value::<SchemaProperty>(prop.clone())
                        .map(|property| (name.clone(), property))
                        .map_err(|e| format!("property '{name}': {e}"))
                })
                .collect::<std::result::Result<Vec<_>, _>>()?,
            Some(_) => return Err("'properties' must be a JSON object".to_string()),
        };

        Ok(Self { raw, properties })
    }
}

impl From<JsonSchema> for JsonValue {
    fn from(schema: JsonSchema) -> Self {
        JsonValue::Object(schema.raw)
    }
}
