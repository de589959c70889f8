use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body returned with every non-2xx API response
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub code: u16,
    pub status: String,
    pub error: String,
}
