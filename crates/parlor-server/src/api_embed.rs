//! The embed endpoint: the document every widget iframe loads.

use crate::AppState;
use axum::{
    extract::{Extension, RawQuery},
    http::{header, HeaderMap, HeaderName},
    response::{Html, IntoResponse, Response},
};
use parlor_widget::{ClientHintProbe, EmbedRequest, WidgetRuntime};
use std::sync::Arc;

/// Asks capable browsers to report the color-scheme preference on requests.
const ACCEPT_CH: HeaderName = HeaderName::from_static("accept-ch");
const CLIENT_HINT: &str = "Sec-CH-Prefers-Color-Scheme";

/// Handler for `GET /embed?config=<token>&preview=true`.
///
/// The query is read raw so the configuration token is percent-decoded once,
/// by the codec. Never fails: a malformed token renders the defaults.
pub async fn embed_handler(
    Extension(state): Extension<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let request = EmbedRequest::from_query(query.as_deref());
    let probe = ClientHintProbe::from_header(
        headers
            .get(ClientHintProbe::HEADER)
            .and_then(|v| v.to_str().ok()),
    );

    let mut runtime = WidgetRuntime::load(&request);
    let open = runtime.mount(&probe);
    tracing::debug!(
        state = open.as_str(),
        preview = request.preview,
        "rendering embed document"
    );
    let document = runtime.render(&state.app_config);

    (
        [
            (ACCEPT_CH, CLIENT_HINT),
            (header::VARY, CLIENT_HINT),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Html(document),
    )
        .into_response()
}
