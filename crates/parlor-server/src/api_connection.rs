//! Voice session connection details for the widget's session panel.

use crate::{api::ApiError, AppState};
use axum::{
    extract::Extension,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use parlor_voice::VoiceError;
use std::sync::Arc;

/// Handler for `GET /api/connection-details`.
///
/// Details embed a short-lived access token and are never cached.
pub async fn connection_details_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let details = state.connection.connection_details().await.map_err(|e| {
        match &e {
            VoiceError::Config(_) | VoiceError::LiveKit(_) => {
                tracing::error!("failed to issue connection details: {}", e)
            }
            VoiceError::Http(_) | VoiceError::Upstream { .. } => {
                tracing::warn!("failed to fetch connection details: {}", e)
            }
        }
        ApiError::from(e)
    })?;

    tracing::info!(room = %details.room_name, "issued connection details");

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(details)).into_response())
}
