//! Widget builder API: defaults, live preview addresses, and embed code.

use crate::{
    api::{request_origin, ApiError},
    builder_page, AppState,
};
use axum::{
    extract::{Extension, Json, RawQuery},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
};
use parlor_types::WidgetConfig;
use parlor_widget::{
    codec, initial_open_state, place, preview_src, snippet::DOWNLOAD_FILENAME, EmbedRequest,
    EmbedScriptGenerator, PlacementMode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Response body for `POST /api/widget/preview`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// Address to navigate the preview iframe to.
    pub src: String,
    /// The encoded configuration, for the download link.
    pub token: String,
    /// Inline style anchoring the preview iframe inside the builder stage.
    #[serde(rename = "frameStyle")]
    pub frame_style: String,
    /// Open state the widget starts in, `minimized` or `expanded`.
    #[serde(rename = "initialState")]
    pub initial_state: String,
}

/// Response body for `POST /api/widget/embed-code`.
#[derive(Debug, Serialize, Deserialize)]
pub struct EmbedCodeResponse {
    pub code: String,
    pub filename: String,
}

/// Merges a builder payload over the defaults.
///
/// Ill-typed fields fall back to their defaults; only a non-object payload is
/// refused.
fn config_from_body(body: &Value) -> Result<WidgetConfig, ApiError> {
    let decoded = codec::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if !decoded.rejected.is_empty() {
        tracing::warn!(
            fields = ?decoded.rejected,
            "ignored widget config fields with unexpected values"
        );
    }
    Ok(decoded.config)
}

fn generator(state: &AppState, headers: &HeaderMap) -> Result<EmbedScriptGenerator, ApiError> {
    let origin = request_origin(headers, state.public_url.as_deref());
    EmbedScriptGenerator::new(&origin).map_err(|e| {
        tracing::warn!(origin = %origin, "cannot generate embed code: {}", e);
        ApiError::BadRequest(e.to_string())
    })
}

/// Handler for `GET /widget`.
pub async fn builder_page_handler() -> Html<String> {
    Html(builder_page::render(&WidgetConfig::default()))
}

/// Handler for `GET /api/widget/defaults`.
pub async fn defaults_handler() -> Json<WidgetConfig> {
    Json(WidgetConfig::default())
}

/// Handler for `POST /api/widget/preview`.
pub async fn preview_handler(
    Json(body): Json<Value>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let config = config_from_body(&body)?;
    let initial = initial_open_state(&config);
    Ok(Json(PreviewResponse {
        src: preview_src(&config),
        token: codec::encode(&config),
        frame_style: place(&config, initial).to_css(PlacementMode::Contained),
        initial_state: initial.as_str().to_string(),
    }))
}

/// Handler for `POST /api/widget/embed-code`.
pub async fn embed_code_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<EmbedCodeResponse>, ApiError> {
    let config = config_from_body(&body)?;
    let code = generator(&state, &headers)?.generate(&config);
    Ok(Json(EmbedCodeResponse {
        code,
        filename: DOWNLOAD_FILENAME.to_string(),
    }))
}

/// Handler for `GET /api/widget/embed-code/download?config=<token>`.
///
/// A missing or malformed token downloads the snippet for the defaults.
pub async fn download_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let request = EmbedRequest::from_query(query.as_deref());
    let config = request
        .config_token
        .as_deref()
        .map(codec::decode)
        .unwrap_or_default();
    let code = generator(&state, &headers)?.generate(&config);

    let disposition = format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        code,
    )
        .into_response())
}
