use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API response for service usage counters
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_pads: usize,
    pub active_sessions: usize,
}
