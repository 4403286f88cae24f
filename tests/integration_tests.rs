//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: schemas → discover → select → sync → Singer messages

use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tap_fbpageinsights::catalog::{discover, Catalog};
use tap_fbpageinsights::cli::{Cli, Runner};
use tap_fbpageinsights::Error;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_ID: &str = "1234567890";

fn schemas_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas")
}

fn config_json(base_url: &str) -> String {
    json!({
        "access_token": "token-abc",
        "page_id": PAGE_ID,
        "start_date": "2019-01-01",
        "end_date": "2019-01-29",
        "api_base_url": base_url
    })
    .to_string()
}

/// Write a catalog with the given streams selected
fn write_catalog(dir: &TempDir, selected: &[&str], alias: Option<(&str, &str)>) -> PathBuf {
    let mut catalog = discover(schemas_dir()).unwrap();
    for id in selected {
        catalog.get_stream_mut(id).unwrap().set_selected(true);
    }
    if let Some((id, name)) = alias {
        catalog.get_stream_mut(id).unwrap().stream_alias = Some(name.to_string());
    }

    let path = dir.path().join("catalog.json");
    std::fs::write(&path, catalog.to_json_pretty().unwrap()).unwrap();
    path
}

fn cli(args: &[String]) -> Cli {
    let mut argv = vec!["tap-fbpageinsights".to_string()];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

async fn run(cli: Cli) -> tap_fbpageinsights::Result<Vec<Value>> {
    let mut out = Vec::new();
    Runner::new(cli).run_with_writer(&mut out).await?;
    Ok(String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect())
}

fn sync_args(server: &MockServer, catalog: &Path) -> Vec<String> {
    vec![
        "--config-json".to_string(),
        config_json(&server.uri()),
        "--catalog".to_string(),
        catalog.display().to_string(),
    ]
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

// ============================================================================
// Discovery Tests
// ============================================================================

#[test]
fn test_discover_bundled_schemas() {
    let catalog = discover(schemas_dir()).unwrap();
    let ids: Vec<&str> = catalog
        .streams
        .iter()
        .map(|s| s.tap_stream_id.as_str())
        .collect();
    assert_eq!(ids, vec!["page_engagement", "page_fans", "page_impressions"]);
    assert!(catalog.selected_stream_ids().is_empty());

    for entry in &catalog.streams {
        assert_eq!(entry.stream, entry.tap_stream_id);
        assert!(entry.key_properties.is_empty());
        assert!(entry.schema.get_property("date").is_some());
    }
}

#[tokio::test]
async fn test_discover_output_round_trips_as_catalog() {
    let args = vec![
        "--config-json".to_string(),
        config_json("https://graph.facebook.com"),
        "--discover".to_string(),
        "--schemas-dir".to_string(),
        schemas_dir().display().to_string(),
    ];
    let mut out = Vec::new();
    Runner::new(cli(&args)).run_with_writer(&mut out).await.unwrap();

    let catalog = Catalog::from_json(std::str::from_utf8(&out).unwrap()).unwrap();
    assert_eq!(catalog, discover(schemas_dir()).unwrap());
}

// ============================================================================
// Sync Tests
// ============================================================================

#[tokio::test]
async fn test_sync_selected_stream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3.2/{PAGE_ID}/insights")))
        .and(query_param("metric", "page_fans,page_fan_adds,page_fan_removes"))
        .and(query_param("since", "2019-01-01"))
        .and(query_param("until", "2019-01-29"))
        .and(query_param("period", "days_28"))
        .and(query_param("access_token", "token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"name": "page_fans", "period": "days_28",
                 "values": [{"value": 42, "end_time": "2019-01-29T08:00:00+0000"}]},
                {"name": "page_fan_adds", "period": "days_28",
                 "values": [{"value": 5, "end_time": "2019-01-29T08:00:00+0000"}]}
            ],
            "paging": {"previous": "...", "next": "..."}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(&dir, &["page_fans"], None);

    let messages = run(cli(&sync_args(&server, &catalog))).await.unwrap();
    assert_eq!(messages.len(), 2);

    assert_eq!(messages[0]["type"], json!("SCHEMA"));
    assert_eq!(messages[0]["stream"], json!("page_fans"));

    assert_eq!(messages[1]["type"], json!("RECORD"));
    assert_eq!(messages[1]["stream"], json!("page_fans"));
    assert_eq!(
        messages[1]["record"],
        json!({"page_fans": 42, "page_fan_adds": 5, "date_extraction": today()})
    );
}

#[tokio::test]
async fn test_sync_nothing_selected_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(&dir, &[], None);

    let messages = run(cli(&sync_args(&server, &catalog))).await.unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_sync_api_error_continues_with_next_stream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("metric", "page_fans,page_fan_adds,page_fan_removes"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Invalid OAuth access token.", "type": "OAuthException", "code": 190}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param(
            "metric",
            "page_impressions,page_impressions_unique,page_impressions_paid,page_impressions_organic,page_impressions_viral",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "page_impressions", "values": [{"value": 1000}]}]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(&dir, &["page_fans", "page_impressions"], None);

    let messages = run(cli(&sync_args(&server, &catalog))).await.unwrap();
    let records: Vec<&Value> = messages.iter().filter(|m| m["type"] == "RECORD").collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["stream"], json!("page_impressions"));
    assert_eq!(records[0]["record"]["page_impressions"], json!(1000));
}

#[tokio::test]
async fn test_sync_dimension_fields_are_not_requested() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("metric", "page_fans,page_fan_removes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "page_fans", "values": [{"value": 3}]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut catalog = discover(schemas_dir()).unwrap();
    let entry = catalog.get_stream_mut("page_fans").unwrap();
    entry.set_selected(true);
    entry.set_dimension("page_fan_adds", true);
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, catalog.to_json_pretty().unwrap()).unwrap();

    let messages = run(cli(&sync_args(&server, &path))).await.unwrap();
    assert_eq!(messages.len(), 2);
}

#[tokio::test]
async fn test_sync_uses_alias_and_properties_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "page_engaged_users", "values": [{"value": 12}]}]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(&dir, &["page_engagement"], Some(("page_engagement", "engagement")));

    let args = vec![
        "--config-json".to_string(),
        config_json(&server.uri()),
        "--properties".to_string(),
        catalog.display().to_string(),
    ];
    let messages = run(cli(&args)).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m["stream"] == "engagement"));
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "page_fans", "values": [{"value": 42}]}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(&dir, &["page_fans"], None);

    let first = run(cli(&sync_args(&server, &catalog))).await.unwrap();
    let second = run(cli(&sync_args(&server, &catalog))).await.unwrap();
    assert_eq!(first[1]["record"], second[1]["record"]);
}

#[tokio::test]
async fn test_sync_accepts_state_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "page_fans", "values": [{"value": 1}]}]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(&dir, &["page_fans"], None);
    let state = dir.path().join("state.json");
    std::fs::write(&state, r#"{"bookmarks": {}}"#).unwrap();

    let mut args = sync_args(&server, &catalog);
    args.extend(["--state".to_string(), state.display().to_string()]);
    let messages = run(cli(&args)).await.unwrap();
    assert_eq!(messages.len(), 2);
}

#[tokio::test]
async fn test_sync_non_json_response_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(&dir, &["page_fans"], None);

    let err = run(cli(&sync_args(&server, &catalog))).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn test_sync_missing_catalog_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let err = run(cli(&sync_args(&server, &dir.path().join("missing.json"))))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}
