//! Catalog module
//!
//! Discovery and stream selection.
//!
//! # Overview
//!
//! The catalog module provides:
//! - `discover` - Builds a catalog from the schema directory
//! - `Catalog` / `CatalogEntry` - The document exchanged between discovery and sync
//! - `MetadataMap` - Breadcrumb metadata used for stream selection and dimensions

mod loader;
mod metadata;
mod types;

pub use loader::{discover, load_schemas};
pub use metadata::{
    field_breadcrumb, Breadcrumb, MetadataEntry, MetadataMap, DIMENSION, SELECTED,
};
pub use types::{Catalog, CatalogEntry};
