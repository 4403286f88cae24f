//! Stream schema module
//!
//! Typed access to the JSON-schema documents that describe each stream.
//!
//! # Features
//!
//! - **Verbatim Round-Trip**: Schemas are written back into catalogs exactly as loaded
//! - **Ordered Properties**: Property declaration order is preserved
//! - **Type Unions**: Nullable and multi-typed properties

mod types;

pub use types::{JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty, StringFormat};
