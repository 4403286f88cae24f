//! Page insights fetcher

use crate::config::TapConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::metrics::MetricSelection;
use crate::types::JsonValue;
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Aggregation period requested for every metric
pub const PERIOD: &str = "days_28";

/// Source of raw insights payloads
#[async_trait]
pub trait InsightsSource: Send + Sync {
    /// Fetch one page of insights for the given metrics
    ///
    /// Returns the parsed body whatever the HTTP status; the caller decides
    /// whether it holds data or an error object.
    async fn fetch(&self, metrics: &MetricSelection) -> Result<JsonValue>;
}

/// Graph API insights fetcher
#[derive(Debug)]
pub struct InsightsFetcher {
    client: HttpClient,
    config: TapConfig,
    url: String,
}

impl InsightsFetcher {
    /// Create a fetcher for the configured page
    pub fn new(config: TapConfig) -> Result<Self> {
        let mut http_config = HttpClientConfig::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds));
        if let Some(agent) = &config.user_agent {
            http_config = http_config.user_agent(agent.clone());
        }

        let client = HttpClient::with_config(http_config.build())?;
        let url = insights_url(&config)?;

        Ok(Self {
            client,
            config,
            url,
        })
    }

    /// Endpoint every request goes to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query parameters for one request
    pub fn request_config(&self, metrics: &str) -> RequestConfig {
        RequestConfig::new()
            .query("since", &self.config.start_date)
            .query("until", &self.config.end_date)
            .query("metric", metrics)
            .query("period", PERIOD)
            .query("access_token", &self.config.access_token)
    }
}

#[async_trait]
impl InsightsSource for InsightsFetcher {
    async fn fetch(&self, metrics: &MetricSelection) -> Result<JsonValue> {
        let metric_param = metrics.joined();
        info!(
            page_id = %self.config.page_id,
            since = %self.config.start_date,
            until = %self.config.end_date,
            "Fetching page insights"
        );

        let response = self
            .client
            .get_json(&self.url, self.request_config(&metric_param))
            .await?;
        Ok(response.body)
    }
}

/// Build `{api_base_url}/{api_version}/{page_id}/insights`
pub fn insights_url(config: &TapConfig) -> Result<String> {
    let mut url = Url::parse(&config.api_base_url)?;
    url.path_segments_mut()
        .map_err(|()| Error::invalid_value("api_base_url", "cannot be used as a base URL"))?
        .pop_if_empty()
        .push(&config.api_version)
        .push(&config.page_id)
        .push("insights");
    Ok(url.to_string())
}
