//! Insights module
//!
//! Issues the single insights request made per stream.
//!
//! Each request asks for every metric of the stream at once over the
//! configured `since`/`until` window with a fixed `days_28` period. Only the
//! first page is read.

mod fetcher;

pub use fetcher::{insights_url, InsightsFetcher, InsightsSource, PERIOD};

#[cfg(test)]
mod tests;
