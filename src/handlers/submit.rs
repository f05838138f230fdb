//! Alert submission handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::models::AlertSubmission;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Accept a panic alert
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<SubmitResponse>> {
    let Json(body) = payload.map_err(|e| {
        tracing::debug!("Unreadable submission body: {}", e);
        AppError::ValidationError("Invalid JSON payload".to_string())
    })?;
    let submission = AlertSubmission::from_json(body)?;

    let intake = state.intake.clone();
    tokio::task::spawn_blocking(move || intake.accept(submission)).await??;

    Ok(Json(SubmitResponse {
        status: "success",
        message: "Alert received",
    }))
}
