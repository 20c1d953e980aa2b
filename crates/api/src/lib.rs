//! Fleet Monitoring API Server
//!
//! HTTP trigger surface for the telemetry pipeline: an ingest endpoint
//! that stands in for the storage-change notification, plus health.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use pipeline::{Orchestrator, TriggerEvent};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Application state shared across handlers
pub struct AppState {
    /// The pipeline orchestrator with its injected collaborators
    pub orchestrator: Orchestrator,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/ingest", post(ingest_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Trigger one pipeline invocation.
///
/// An absent or empty body runs fallback mode against the configured
/// default source. The caller always sees the fixed success body unless a
/// collaborator failure propagates, which surfaces as a 500.
async fn ingest_handler(
    State(state): State<Arc<AppState>>,
    event: Option<Json<TriggerEvent>>,
) -> impl IntoResponse {
    let event = event.map(|Json(event)| event).unwrap_or_default();

    match state.orchestrator.handle(event).await {
        Ok(response) => (StatusCode::OK, response.body),
        Err(e) => {
            error!("Pipeline invocation failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
