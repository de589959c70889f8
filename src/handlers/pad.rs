use crate::{models::PadInfoResponse, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Read a pad's current content, creating the pad if it does not exist
pub async fn pad_read(
    State(app_state): State<Arc<AppState>>,
    Path(pad_name): Path<String>,
) -> Json<PadInfoResponse> {
    debug!("Read requested for pad '{}'", pad_name);
    let pad = app_state.store.get_or_create(&pad_name);
    let (content, last_modified) = pad.read();
    Json(PadInfoResponse {
        name: pad.name().to_string(),
        content,
        last_modified,
    })
}
