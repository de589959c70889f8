use crate::{
    models::{ErrorResponse, PadHistoryResponse},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::error;

/// Snapshot history for a pad
pub async fn pad_history(
    State(app_state): State<Arc<AppState>>,
    Path(pad_name): Path<String>,
) -> Result<(StatusCode, Json<PadHistoryResponse>), (StatusCode, Json<ErrorResponse>)> {
    let pad = match app_state.store.get(&pad_name) {
        Some(pad) => pad,
        None => {
            error!("Pad '{}' not found", pad_name);
            let status = StatusCode::NOT_FOUND;
            return Err((status, Json(ErrorResponse {
                code: status.as_u16(),
                status: status.to_string(),
                error: format!("Pad '{}' not found", pad_name),
            })));
        }
    };

    let snapshots = pad.snapshots();
    Ok((
        StatusCode::OK,
        Json(PadHistoryResponse {
            name: pad.name().to_string(),
            count: snapshots.len(),
            snapshots,
        }),
    ))
}
