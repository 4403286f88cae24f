//! Tests for the insights fetcher

use super::*;
use crate::config::TapConfig;
use crate::error::Error;
use crate::metrics::MetricSelection;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base_url: &str) -> TapConfig {
    TapConfig::new("token-abc", "1234567890", "2019-01-01", "2019-01-29")
        .with_api_base_url(base_url)
}

fn selection(metrics: &[&str]) -> MetricSelection {
    MetricSelection {
        metrics: metrics.iter().map(ToString::to_string).collect(),
        excluded: Vec::new(),
    }
}

#[test]
fn test_insights_url_default_host() {
    let config = TapConfig::new("t", "1234567890", "2019-01-01", "2019-01-29");
    assert_eq!(
        insights_url(&config).unwrap(),
        "https://graph.facebook.com/v3.2/1234567890/insights"
    );
}

#[test]
fn test_insights_url_trailing_slash() {
    let config = config("http://localhost:9000/");
    assert_eq!(
        insights_url(&config).unwrap(),
        "http://localhost:9000/v3.2/1234567890/insights"
    );
}

#[test]
fn test_insights_url_invalid_base() {
    let err = insights_url(&config("not a url")).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));

    let err = insights_url(&config("mailto:someone@example.com")).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_request_params() {
    let fetcher = InsightsFetcher::new(config("http://localhost")).unwrap();
    let request = fetcher.request_config("page_fans,page_views_total");

    let params: Vec<(&str, &str)> = request
        .query
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        params,
        vec![
            ("since", "2019-01-01"),
            ("until", "2019-01-29"),
            ("metric", "page_fans,page_views_total"),
            ("period", "days_28"),
            ("access_token", "token-abc"),
        ]
    );
}

#[tokio::test]
async fn test_fetch_sends_window_and_metrics() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.2/1234567890/insights"))
        .and(query_param("since", "2019-01-01"))
        .and(query_param("until", "2019-01-29"))
        .and(query_param("metric", "page_fans,page_impressions"))
        .and(query_param("period", "days_28"))
        .and(query_param("access_token", "token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "page_fans", "values": [{"value": 42}]}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = InsightsFetcher::new(config(&mock_server.uri())).unwrap();
    let body = fetcher
        .fetch(&selection(&["page_fans", "page_impressions"]))
        .await
        .unwrap();

    assert_eq!(body["data"][0]["name"], "page_fans");
}

#[tokio::test]
async fn test_fetch_returns_error_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.2/1234567890/insights"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Invalid OAuth access token.", "type": "OAuthException"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = InsightsFetcher::new(config(&mock_server.uri())).unwrap();
    let body = fetcher.fetch(&selection(&["page_fans"])).await.unwrap();
    assert_eq!(body["error"]["type"], "OAuthException");
}

#[tokio::test]
async fn test_fetch_non_json_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let fetcher = InsightsFetcher::new(config(&mock_server.uri())).unwrap();
    let err = fetcher.fetch(&selection(&["page_fans"])).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_transport_error_hides_access_token() {
    // Nothing listens on port 1, so the connection is refused
    let config = TapConfig::new("SECRET-TOKEN-XYZ", "42", "2019-01-01", "2019-01-29")
        .with_api_base_url("http://127.0.0.1:1");
    let fetcher = InsightsFetcher::new(config).unwrap();

    let err = fetcher.fetch(&selection(&["page_fans"])).await.unwrap_err();
    assert!(err.is_transport());

    let message = err.to_string();
    assert!(!message.contains("SECRET-TOKEN-XYZ"), "{message}");
    assert!(!message.contains("access_token"), "{message}");
}
