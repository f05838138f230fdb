//! Latest alert map handler

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
};

use crate::store::map::NO_MAP_PLACEHOLDER;
use crate::{AppResult, AppState};

/// Serve the latest map, or a 404 placeholder before the first alert
pub async fn latest(State(state): State<AppState>) -> AppResult<(StatusCode, Html<String>)> {
    let intake = state.intake.clone();
    let document = tokio::task::spawn_blocking(move || intake.map().current()).await??;

    Ok(match document {
        Some(doc) => (StatusCode::OK, Html(doc)),
        None => (StatusCode::NOT_FOUND, Html(NO_MAP_PLACEHOLDER.to_string())),
    })
}
