use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::config::Config;
use crate::scoring::{FeatureTemplate, LogisticModel, Scoring};
use crate::{create_router, AppState};

fn config(dir: &TempDir) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        model_path: dir.path().join("classifier.json"),
        features_path: dir.path().join("feature_columns.json"),
        alert_log_path: dir.path().join("alerts_log.csv"),
        map_path: dir.path().join("latest_alert_map.html"),
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
    }
}

fn ready_scoring() -> Scoring {
    let template = FeatureTemplate::from_columns(
        ["Latitude", "Longitude", "Incident Type_Theft"].iter().map(|s| s.to_string()).collect(),
    )
    .unwrap();
    let model = LogisticModel { intercept: 0.5, coefficients: vec![0.0, 0.0, 1.0], threshold: 0.5 };
    Scoring::ready(template, Arc::new(model)).unwrap()
}

fn app(dir: &TempDir, scoring: Scoring) -> Router {
    create_router(AppState::new(config(dir), scoring))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn send_json(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, req).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn log_rows(dir: &TempDir) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(dir.path().join("alerts_log.csv")).unwrap();
    reader.records().map(|r| r.unwrap()).collect()
}

#[tokio::test]
async fn test_submit_success() {
    let dir = tempfile::tempdir().unwrap();
    let body = json!({"lat": 12.9, "lon": 77.6, "incident_type": "Theft"}).to_string();

    let (status, json) = send_json(app(&dir, ready_scoring()), post_json("/submit", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"status": "success", "message": "Alert received"}));

    let rows = log_rows(&dir);
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "12.9");
    assert_eq!(&rows[0][1], "77.6");
    assert_eq!(&rows[0][2], "Theft");
    assert_eq!(&rows[0][4], "Resolved");
}

#[tokio::test]
async fn test_submit_missing_lat() {
    let dir = tempfile::tempdir().unwrap();
    let body = json!({"lon": 77.6, "incident_type": "Theft"}).to_string();

    let (status, json) = send_json(app(&dir, ready_scoring()), post_json("/submit", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"status": "error", "message": "Incomplete data"}));
    assert!(!dir.path().join("alerts_log.csv").exists());
}

#[tokio::test]
async fn test_submit_missing_any_field() {
    let dir = tempfile::tempdir().unwrap();
    for body in [
        json!({"lat": 12.9, "incident_type": "Theft"}),
        json!({"lat": 12.9, "lon": 77.6}),
        json!({"lat": "", "lon": 77.6, "incident_type": "Theft"}),
    ] {
        let (status, json) =
            send_json(app(&dir, ready_scoring()), post_json("/submit", &body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
    }
}

#[tokio::test]
async fn test_submit_unparseable_body() {
    let dir = tempfile::tempdir().unwrap();

    for body in ["", "{not json", "[1, 2]"] {
        let (status, json) = send_json(app(&dir, ready_scoring()), post_json("/submit", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
    }

    let req = Request::builder()
        .method("POST")
        .uri("/submit")
        .body(Body::from("lat=1"))
        .unwrap();
    let (status, _) = send_json(app(&dir, ready_scoring()), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_without_model_logs_not_available() {
    let dir = tempfile::tempdir().unwrap();
    let body = json!({"lat": 12.9, "lon": 77.6, "incident_type": "Theft"}).to_string();

    let (status, _) =
        send_json(app(&dir, Scoring::unavailable("missing")), post_json("/submit", &body)).await;
    assert_eq!(status, StatusCode::OK);

    let rows = log_rows(&dir);
    assert_eq!(&rows[0][4], "N/A");
    assert_eq!(&rows[0][5], "N/A");
}

#[tokio::test]
async fn test_submit_storage_failure_is_500() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("alerts_log.csv")).unwrap();
    let body = json!({"lat": 12.9, "lon": 77.6, "incident_type": "Theft"}).to_string();

    let (status, json) = send_json(app(&dir, ready_scoring()), post_json("/submit", &body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    assert!(!json["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_map_before_and_after_submission() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = send(app(&dir, ready_scoring()), get("/map")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No alerts have been received yet"));

    let submission = json!({"lat": 12.9, "lon": 77.6, "incident_type": "Theft"}).to_string();
    let (status, _) = send_json(app(&dir, ready_scoring()), post_json("/submit", &submission)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app(&dir, ready_scoring()), get("/map")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("L.marker([12.9, 77.6])"));
    assert!(body.contains("Theft"));
}

#[tokio::test]
async fn test_index_serves_form() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = send(app(&dir, ready_scoring()), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("incident_type"));
}

#[tokio::test]
async fn test_health_reports_scoring_state() {
    let dir = tempfile::tempdir().unwrap();

    let (status, json) = send_json(app(&dir, ready_scoring()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["scoring"], "ready");
    assert_eq!(json["feature_count"], 3);

    let (_, json) = send_json(app(&dir, Scoring::unavailable("missing")), get("/health")).await;
    assert_eq!(json["scoring"], "unavailable");
    assert_eq!(json["feature_count"], 0);
}
