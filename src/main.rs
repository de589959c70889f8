mod models;
mod handlers;
mod routes;
mod docs;
mod config;
mod store;
mod ws;

use axum::http::HeaderValue;
use axum::{routing::get, Router};
use config::Config;
use docs::ApiDoc;
use routes::create_api_routes;
use std::panic;
use std::sync::Arc;
use store::PadStore;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, error, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use ws::handler::pad_ws_handler;
use ws::hub::SessionHub;

/// Shared state handed to every handler and the WebSocket gateway
pub struct AppState {
    pub store: Arc<PadStore>,
    pub sessions: Arc<SessionHub>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {

    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level, but allow debug for our app
            "padhub=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        warn!("Using default configuration");
        Config::default()
    });

    // Wire up the in-memory store and the session hub
    let store = Arc::new(PadStore::new());
    let sessions = Arc::new(SessionHub::new(store.clone(), config.snapshot_interval()));
    let state = Arc::new(AppState { store, sessions });

    let app_routes = app(state, &config);

    // Start the HTTP/WebSocket server
    let listener = tokio::net::TcpListener::bind(config.server_address())
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", config.server_address()));

    info!("🚀 Server running on http://{}", config.server_address());
    info!("📡 WebSocket available at ws://{}/ws/:name", config.server_address());
    if !config.is_production() {
        info!("📚 Swagger UI available at http://{}/swagger", config.server_address());
    }

    axum::serve(listener, app_routes)
        .await
        .expect("Server failed to start");
}

/// Build the full router; tests serve this against an ephemeral listener
fn app(state: Arc<AppState>, config: &Config) -> Router {
    let api_routes = create_api_routes(state.clone());

    let mut app_routes = Router::new()
        // Live pad socket plus the read-only pad endpoint
        .route("/ws/:name", get(pad_ws_handler))
        .route("/pad/:name", get(handlers::pad_read))
        .with_state(state)
        // Mount API routes
        .nest("/api", api_routes)
        // CORS policy from config
        .layer(cors_layer(config))
        // Add tracing layer
        .layer(TraceLayer::new_for_http());

    // Mount Swagger UI outside production
    if !config.is_production() {
        app_routes = app_routes
            .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app_routes
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.is_development() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    match config.cors_origins.as_deref() {
        Some(origins) if origins != "*" => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}
