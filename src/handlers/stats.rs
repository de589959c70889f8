use crate::{models::StatsResponse, AppState};
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

/// Usage counters consumed by status pages
pub async fn stats(State(app_state): State<Arc<AppState>>) -> Json<StatsResponse> {
    debug!("Stats requested");
    Json(StatsResponse {
        total_pads: app_state.store.len(),
        active_sessions: app_state.sessions.active_sessions(),
    })
}
