//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    scoring: &'static str,
    feature_count: usize,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let scoring = state.intake.scoring();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        scoring: scoring.status(),
        feature_count: scoring.feature_count(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
