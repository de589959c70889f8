use crate::models::*;
use utoipa::OpenApi;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse)
    )
)]
#[allow(dead_code)]
pub async fn ready_check_doc() {}

/// Read a pad, creating it when absent
#[utoipa::path(
    get,
    path = "/pad/{name}",
    params(
        ("name" = String, Path, description = "Pad name")
    ),
    responses(
        (status = 200, description = "Current pad content", body = PadInfoResponse)
    )
)]
#[allow(dead_code)]
pub async fn pad_read_doc() {}

/// Service usage counters
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Pad and session counters", body = StatsResponse)
    )
)]
#[allow(dead_code)]
pub async fn stats_doc() {}

/// Live diagnostics
#[utoipa::path(
    get,
    path = "/api/diagnostics",
    responses(
        (status = 200, description = "Connection counters and system usage", body = DiagnosticsResponse)
    )
)]
#[allow(dead_code)]
pub async fn diagnostics_doc() {}

/// Snapshot history for a pad
#[utoipa::path(
    get,
    path = "/api/pads/{name}/history",
    params(
        ("name" = String, Path, description = "Pad name")
    ),
    responses(
        (status = 200, description = "Snapshot history", body = PadHistoryResponse),
        (status = 404, description = "Pad not found", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn pad_history_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        ready_check_doc,
        pad_read_doc,
        stats_doc,
        diagnostics_doc,
        pad_history_doc,
    ),
    components(
        schemas(
            HealthResponse,
            ReadyResponse,
            PadInfoResponse,
            StatsResponse,
            DiagnosticsResponse,
            PadHistoryResponse,
            PadSnapshot,
            ErrorResponse
        )
    ),
    tags(
        (name = "api", description = "API endpoints")
    )
)]
pub struct ApiDoc;
