// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tap-fbpageinsights
//!
//! A Singer tap that pulls Facebook page insights through the Graph API.
//!
//! ## Features
//!
//! - **Discovery**: Builds a catalog from one JSON schema per stream
//! - **Metadata Selection**: Streams and dimension fields chosen via catalog metadata
//! - **One Record Per Stream**: Every metric of a stream fetched in one request
//! - **Schema Coercion**: Values checked and coerced before emission
//! - **Singer Output**: SCHEMA and RECORD messages on stdout
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_fbpageinsights::catalog::Catalog;
//! use tap_fbpageinsights::config::TapConfig;
//! use tap_fbpageinsights::engine::{MemorySink, SyncEngine};
//! use tap_fbpageinsights::insights::InsightsFetcher;
//!
//! #[tokio::main]
//! async fn main() -> tap_fbpageinsights::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let catalog = Catalog::from_file("catalog.json")?;
//!
//!     let mut engine = SyncEngine::new(InsightsFetcher::new(config)?);
//!     let mut sink = MemorySink::new();
//!     let stats = engine.sync(&catalog, None, &mut sink).await?;
//!     println!("{} records", stats.records_emitted);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌─────────┐
//! │  Catalog  │ → │ Metrics  │ → │ Insights │ → │  Record  │ → │  Sink   │
//! │ discover  │   │ classify │   │  fetch   │   │ build +  │   │ SCHEMA  │
//! │ select    │   │          │   │ (http)   │   │transform │   │ RECORD  │
//! └───────────┘   └──────────┘   └──────────┘   └──────────┘   └─────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap configuration
pub mod config;

/// JSON schema model
pub mod schema;

/// Catalog, metadata and discovery
pub mod catalog;

/// Metric classification
pub mod metrics;

/// HTTP client
pub mod http;

/// Graph API insights requests
pub mod insights;

/// Record building and schema coercion
pub mod record;

/// Run state
pub mod state;

/// Sync engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
