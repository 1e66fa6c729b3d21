use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use parlor_server::{
    api_widget::{EmbedCodeResponse, PreviewResponse},
    app, AppState,
};
use parlor_types::{WidgetConfig, WidgetPosition};
use parlor_voice::{ConnectionSource, LiveKitConfig, VoiceService};
use parlor_widget::{codec, EmbedRequest};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(public_url: Option<&str>) -> axum::Router {
    app(AppState {
        app_config: Arc::new(Default::default()),
        public_url: public_url.map(str::to_string),
        connection: Arc::new(ConnectionSource::Local(VoiceService::new(
            LiveKitConfig::default(),
        ))),
    })
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn post_json(router: axum::Router, uri: &str, body: Value) -> axum::response::Response {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .header("host", "widget.example.com")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_defaults_endpoint() {
    let response = test_app(None)
        .oneshot(
            Request::builder()
                .uri("/api/widget/defaults")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let config: WidgetConfig = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(config, WidgetConfig::default());
}

#[tokio::test]
async fn test_preview_merges_partial_config() {
    let response = post_json(
        test_app(None),
        "/api/widget/preview",
        json!({ "position": "top-left", "zIndex": "high" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let preview: PreviewResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();

    assert!(preview.src.starts_with("/embed?config="));
    assert!(preview.src.ends_with("&preview=true"));
    let request = EmbedRequest::from_query(preview.src.split_once('?').map(|(_, q)| q));
    let config = codec::decode(request.config_token.as_deref().unwrap());
    assert_eq!(config.position, WidgetPosition::TopLeft);
    assert_eq!(config.z_index, 1000);
    assert_eq!(request.config_token.as_deref(), Some(preview.token.as_str()));
    assert!(preview
        .frame_style
        .starts_with("position: absolute; z-index: 1000; top: 20px; left: 20px;"));
}

#[tokio::test]
async fn test_preview_reports_expanded_when_neither_flag_is_set() {
    let response = post_json(
        test_app(None),
        "/api/widget/preview",
        json!({ "autoOpen": false, "showMinimized": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let preview: PreviewResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();

    assert_eq!(preview.initial_state, "expanded");
    assert!(preview.frame_style.contains("width: 400px; height: 600px"));
}

#[tokio::test]
async fn test_preview_rejects_non_object() {
    let response = post_json(test_app(None), "/api/widget/preview", json!([1, 2])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("JSON object"));
}

#[tokio::test]
async fn test_embed_code_uses_request_origin() {
    let response = post_json(
        test_app(None),
        "/api/widget/embed-code",
        json!({ "autoOpen": true, "showMinimized": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let embed: EmbedCodeResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();

    assert_eq!(embed.filename, "parlor-widget-embed.html");
    assert!(embed.code.contains("http://widget.example.com/embed?config="));
    assert!(embed.code.contains("'width: 400px'"));
    assert!(embed.code.contains("'height: 600px'"));
}

#[tokio::test]
async fn test_embed_code_is_deterministic() {
    let body = json!({ "theme": "dark", "customTitle": "Help & Support" });
    let first = body_bytes(post_json(test_app(None), "/api/widget/embed-code", body.clone()).await).await;
    let second = body_bytes(post_json(test_app(None), "/api/widget/embed-code", body).await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_embed_code_prefers_public_url() {
    let response = post_json(
        test_app(Some("https://assistant.example.org/")),
        "/api/widget/embed-code",
        json!({}),
    )
    .await;
    let embed: EmbedCodeResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(embed.code.contains("\"https://assistant.example.org/embed?config="));
}

#[tokio::test]
async fn test_download_is_an_attachment() {
    let config = WidgetConfig {
        position: WidgetPosition::BottomLeft,
        ..WidgetConfig::default()
    };
    let response = test_app(None)
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/api/widget/embed-code/download?config={}",
                    codec::encode(&config)
                ))
                .header("host", "localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"parlor-widget-embed.html\""
    );
    let code = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(code.starts_with("<!-- Parlor Voice Assistant Widget -->"));
    assert!(code.contains("'left: 20px'"));
    assert!(code.contains("http://localhost:3000/embed?config="));
}

#[tokio::test]
async fn test_builder_page_renders() {
    let response = test_app(None)
        .oneshot(Request::builder().uri("/widget").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("id=\"preview-frame\""));
    assert!(html.contains("data-tab=\"advanced\""));
    assert!(html.contains("data.initialState"));
}
