//! HTTP client module
//!
//! Provides the JSON-over-HTTP client used to reach the Graph API.
//!
//! # Features
//!
//! - **Bounded Timeouts**: Every request carries a timeout
//! - **Status-Agnostic Bodies**: Error payloads come back as JSON for the caller to inspect
//! - **No Retries**: Transport failures surface immediately

mod client;

pub use client::{HttpClient, HttpClientConfig, JsonResponse, RequestConfig};
