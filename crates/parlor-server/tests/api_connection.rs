use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use parlor_server::{app, AppState};
use parlor_voice::{ConnectionSource, LiveKitConfig, RemoteConnectionDetails, VoiceService};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;

fn test_app(connection: ConnectionSource) -> Router {
    app(AppState {
        app_config: Arc::new(Default::default()),
        public_url: None,
        connection: Arc::new(connection),
    })
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let router = test_app(ConnectionSource::Local(VoiceService::new(
        LiveKitConfig::default(),
    )));
    let (status, _, json) = get_json(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_connection_details_unconfigured() {
    let router = test_app(ConnectionSource::Local(VoiceService::new(
        LiveKitConfig::default(),
    )));
    let (status, _, json) = get_json(router, "/api/connection-details").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "LIVEKIT_URL is not defined");
}

#[tokio::test]
async fn test_connection_details_issued_locally() {
    let router = test_app(ConnectionSource::Local(VoiceService::new(
        LiveKitConfig::new("ws://localhost:7880", "devkey", "devsecret"),
    )));
    let (status, headers, json) = get_json(router, "/api/connection-details").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["cache-control"], "no-store");
    assert_eq!(json["serverUrl"], "ws://localhost:7880");
    assert_eq!(json["participantName"], "user");
    assert!(json["roomName"]
        .as_str()
        .unwrap()
        .starts_with("voice_assistant_room_"));
    assert!(!json["participantToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_connection_details_remote_failure_is_bad_gateway() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let upstream = Router::new().route(
            "/details",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "LIVEKIT_API_KEY is not defined" })),
                )
            }),
        );
        axum::serve(listener, upstream).await.unwrap();
    });

    let remote = RemoteConnectionDetails::new(format!("http://{}/details", addr)).unwrap();
    let (status, _, json) =
        get_json(test_app(ConnectionSource::Remote(remote)), "/api/connection-details").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "LIVEKIT_API_KEY is not defined");
}
