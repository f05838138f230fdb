//! Panic Alert Intake Service
//!
//! Receives panic/incident alerts over HTTP, scores them with a pre-trained
//! classifier, appends them to a CSV log and renders the latest one on a map.
//!
//! # Flow
//!
//! ```text
//! POST /submit
//!     │
//!     ▼
//! ┌──────────┐   ┌────────────────┐   ┌────────────┐   ┌────────────┐
//! │ validate │──▶│ feature vector │──▶│ classifier │──▶│ alerts log │
//! └──────────┘   └────────────────┘   └────────────┘   └─────┬──────┘
//!                                                            ▼
//!                                                      ┌────────────┐
//!                                                      │ latest map │
//!                                                      └────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod intake;
mod models;
mod scoring;
mod store;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use intake::IntakeHandler;
use scoring::Scoring;
use store::{AlertLog, MapRenderer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry RUST_LOG, load it before the subscriber
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "panic_alert=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env();

    tracing::info!("Panic Alert service starting...");
    tracing::info!("Alert log: {}", config.alert_log_path.display());
    tracing::info!("Map document: {}", config.map_path.display());

    // Missing model files degrade scoring, they never stop startup
    let scoring = Scoring::load(&config.model_path, &config.features_path);

    let state = AppState::new(config.clone(), scoring);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<IntakeHandler>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config, scoring: Scoring) -> Self {
        let intake = IntakeHandler::new(
            Arc::new(scoring),
            AlertLog::new(config.alert_log_path.clone()),
            MapRenderer::new(config.map_path.clone()),
        );

        Self {
            intake: Arc::new(intake),
            config,
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let form = ServeFile::new(state.config.form_path());
    let assets = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route_service("/", form)
        .route("/submit", post(handlers::submit::submit))
        .route("/map", get(handlers::map::latest))
        .route("/health", get(handlers::health::check))
        // Remaining static assets are served from the site root
        .fallback_service(assets)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
