use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API response for the read-only pad endpoint
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PadInfoResponse {
    pub name: String,
    pub content: String,
    pub last_modified: DateTime<Utc>,
}
