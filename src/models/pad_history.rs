use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::PadSnapshot;

/// API response for a pad's snapshot history
#[derive(Serialize, Deserialize, ToSchema)]
pub struct PadHistoryResponse {
    pub name: String,
    pub count: usize,
    pub snapshots: Vec<PadSnapshot>,
}
