use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use parlor_server::{app, AppState};
use parlor_types::{EmbedAppConfig, WidgetConfig, WidgetPosition};
use parlor_voice::{ConnectionSource, LiveKitConfig, VoiceService};
use parlor_widget::codec;
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    app(AppState {
        app_config: Arc::new(EmbedAppConfig::default()),
        public_url: None,
        connection: Arc::new(ConnectionSource::Local(VoiceService::new(
            LiveKitConfig::default(),
        ))),
    })
}

async fn get_embed(uri: &str, hint: Option<&str>) -> (StatusCode, axum::http::HeaderMap, String) {
    let mut request = Request::builder().uri(uri);
    if let Some(hint) = hint {
        request = request.header("sec-ch-prefers-color-scheme", hint);
    }
    let response = test_app()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_embed_without_config_renders_default_launcher() {
    let (status, headers, html) = get_embed("/embed", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(headers["accept-ch"], "Sec-CH-Prefers-Color-Scheme");
    assert_eq!(headers["cache-control"], "no-store");

    assert!(html.contains(r#"data-state="minimized""#));
    assert!(html.contains(r#"data-mode="overlay""#));
    assert!(html.contains(
        "position: fixed; z-index: 1000; bottom: 20px; right: 20px; width: 64px; height: 64px; border-radius: 50%"
    ));
    assert!(html.contains("<span class=\"tooltip\">Voice Assistant</span>"));
    assert!(html.contains("--primary: #002cf2;"));
}

#[tokio::test]
async fn test_embed_applies_encoded_config() {
    let config = WidgetConfig {
        position: WidgetPosition::TopLeft,
        auto_open: true,
        show_minimized: false,
        width: 520,
        custom_title: "Concierge".to_string(),
        custom_css: ".widget-header { letter-spacing: 1px; }".to_string(),
        ..WidgetConfig::default()
    };
    let uri = format!("/embed?config={}", codec::encode(&config));
    let (_, _, html) = get_embed(&uri, None).await;

    assert!(html.contains(r#"data-state="expanded""#));
    assert!(html.contains("top: 20px; left: 20px; width: 520px; height: 600px; border-radius: 16px"));
    assert!(html.contains("<h3>Concierge</h3>"));
    assert!(html.contains(
        "<style data-parlor-custom>.widget-header { letter-spacing: 1px; }</style>"
    ));
}

#[tokio::test]
async fn test_embed_preview_renders_inline() {
    let (_, _, html) = get_embed("/embed?config=%7B%7D&preview=true", None).await;
    assert!(html.contains(r#"data-mode="inline""#));
    assert!(!html.contains("position: fixed; z-index"));
}

#[tokio::test]
async fn test_embed_malformed_config_falls_back_to_defaults() {
    let (status, _, html) = get_embed("/embed?config=%7Bnot-json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"data-state="minimized""#));
    assert!(html.contains("bottom: 20px; right: 20px"));
}

#[tokio::test]
async fn test_embed_auto_theme_follows_client_hint() {
    let config = r#"{"theme":"auto"}"#;
    let uri = format!("/embed?config={}", codec::encode_component(config));

    let (_, _, html) = get_embed(&uri, Some("dark")).await;
    assert!(html.contains(r#"<html lang="en" class="dark""#));
    assert!(!html.contains("prefers-color-scheme: dark"));

    // Without the hint the document re-evaluates once on the client.
    let (_, _, html) = get_embed(&uri, None).await;
    assert!(html.contains(r#"<html lang="en" class="""#));
    assert!(html.contains("prefers-color-scheme: dark"));
}

#[tokio::test]
async fn test_embed_explicit_theme_ignores_client_hint() {
    let uri = format!(
        "/embed?config={}",
        codec::encode_component(r#"{"theme":"light"}"#)
    );
    let (_, _, html) = get_embed(&uri, Some("dark")).await;
    assert!(html.contains(r#"<html lang="en" class="""#));
}
