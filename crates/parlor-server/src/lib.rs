//! Parlor server library logic.
//!
//! Serves the embed document, the widget builder and its API, and voice
//! session connection details.

pub mod api;
pub mod api_connection;
pub mod api_embed;
pub mod api_widget;
pub mod builder_page;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{get, post},
    Extension, Json, Router,
};
use parlor_types::EmbedAppConfig;
use parlor_voice::ConnectionSource;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Title/subtitle fallbacks and session labels.
    pub app_config: Arc<EmbedAppConfig>,
    /// Configured origin for generated snippets, if any.
    pub public_url: Option<String>,
    /// Where voice session connection details come from.
    pub connection: Arc<ConnectionSource>,
}

/// Maximum request body size (256 KiB). Builder payloads are small JSON documents.
const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(|| async { Redirect::temporary("/widget") }))
        .route("/embed", get(api_embed::embed_handler))
        .route("/widget", get(api_widget::builder_page_handler))
        .route("/api/widget/defaults", get(api_widget::defaults_handler))
        .route("/api/widget/preview", post(api_widget::preview_handler))
        .route("/api/widget/embed-code", post(api_widget::embed_code_handler))
        .route(
            "/api/widget/embed-code/download",
            get(api_widget::download_handler),
        )
        .route(
            "/api/connection-details",
            get(api_connection::connection_details_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
