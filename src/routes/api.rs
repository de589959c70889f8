use crate::handlers::{diagnostics, health_check, pad_history, ready_check, stats};
use crate::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Create API routes
pub fn create_api_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/stats", get(stats))
        .route("/diagnostics", get(diagnostics))
        .route("/pads/:name/history", get(pad_history))
        .with_state(app_state)
}
