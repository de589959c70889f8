use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API response for the liveness endpoint
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}