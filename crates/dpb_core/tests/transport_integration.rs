//! Transport and lifecycle tests against a fake paste store over real HTTP.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use dpb_core::lifecycle::ViewPhase;
use dpb_core::models::AddRequest;
use dpb_core::{
    ClassifiedError, ClientConfig, CreateController, CreateOutcome, Navigation, PasteDraft,
    TransportClient, TransportError, ViewController, ViewOutcome,
};
use serde_json::{json, Value};
use std::time::Duration;

async fn add(Json(body): Json<Value>) -> Response {
    let expiration = body["expiration"].as_u64().unwrap_or(u64::MAX);
    if expiration > 604_800 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "code": 2,
                "reason": "ERR_INVALID_REQUEST",
                "message": "Invalid request"
            })),
        )
            .into_response();
    }
    if body["title"] == "explode" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "code": 3,
                "reason": "ERR_INTERNAL_SERVER_ERROR",
                "message": "Internal server error"
            })),
        )
            .into_response();
    }
    Json(json!({ "key": "abc123" })).into_response()
}

async fn query(Path(key): Path<String>) -> Response {
    match key.as_str() {
        "abc123" => Json(json!({
            "title": "Notes",
            "content": "# Hello\n\n```katex\nc=\\sqrt{2}\n```",
            "created_at": "2026-10-14T08:00:00+00:00",
            "expire_at": "2026-10-15T08:00:00+00:00"
        }))
        .into_response(),
        "a/b" => Json(json!({
            "title": "Slash",
            "content": "ok",
            "created_at": "2026-10-14T08:00:00+00:00"
        }))
        .into_response(),
        "broken" => (StatusCode::OK, "not json").into_response(),
        "gateway" => (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").into_response(),
        "teapot" => (
            StatusCode::IM_A_TEAPOT,
            Json(json!({ "code": 1, "reason": "ERR_NOT_FOUND", "message": "short and stout" })),
        )
            .into_response(),
        "crash" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "code": 3,
                "reason": "ERR_INTERNAL_SERVER_ERROR",
                "message": "Internal server error"
            })),
        )
            .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "code": 1,
                "reason": "ERR_NOT_FOUND",
                "message": "Resource not found"
            })),
        )
            .into_response(),
    }
}

async fn spawn_store() -> String {
    let app = Router::new()
        .route("/add", post(add))
        .route("/query/:key", get(query));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake store");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake store");
    });
    format!("http://{}", addr)
}

fn client_for(base_url: String) -> TransportClient {
    let config = ClientConfig {
        base_url,
        timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    };
    TransportClient::new(config).expect("client")
}

async fn store_client() -> TransportClient {
    client_for(spawn_store().await)
}

fn classification(result: Result<impl std::fmt::Debug, TransportError>) -> ClassifiedError {
    match result {
        Err(TransportError::Classified(classified)) => classified,
        other => panic!("expected classified error, got {:?}", other),
    }
}

#[tokio::test]
async fn create_paste_returns_assigned_key() {
    let client = store_client().await;
    let response = client
        .create_paste(&AddRequest {
            title: "t".to_string(),
            content: "c".to_string(),
            expiration: 3600,
        })
        .await
        .expect("create");
    assert_eq!(response.key, "abc123");
}

#[tokio::test]
async fn store_error_bodies_classify_by_status_code_and_reason() {
    let client = store_client().await;

    let rejected = classification(
        client
            .create_paste(&AddRequest {
                title: "t".to_string(),
                content: "c".to_string(),
                expiration: 700_000,
            })
            .await,
    );
    assert!(matches!(rejected, ClassifiedError::InvalidRequest { .. }));
    assert_eq!(rejected.to_string(), "ERR_INVALID_REQUEST: Invalid request");

    let cases = [
        ("missing", "not_found", "ERR_NOT_FOUND", "Resource not found"),
        (
            "crash",
            "internal_error",
            "ERR_INTERNAL_SERVER_ERROR",
            "Internal server error",
        ),
        ("teapot", "unknown", "ERR_NOT_FOUND", "short and stout"),
        ("gateway", "unknown", "UNKNOWN_REASON", "Unknown error occurred."),
    ];
    for (key, kind, reason, message) in cases {
        let classified = classification(client.query_paste(key).await);
        assert_eq!(classified.kind(), kind, "key: {}", key);
        assert_eq!(classified.reason(), reason, "key: {}", key);
        assert_eq!(classified.message(), message, "key: {}", key);
    }
}

#[tokio::test]
async fn query_paste_decodes_document_and_encodes_key() {
    let client = store_client().await;

    let response = client.query_paste("abc123").await.expect("query");
    assert_eq!(response.title, "Notes");
    assert!(response.expire_at.is_some());

    let slashed = client.query_paste("a/b").await;
    // "a/b" is sent as one encoded segment, which the router decodes back.
    assert_eq!(slashed.expect("query").title, "Slash");
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let client = store_client().await;
    match client.query_paste("broken").await {
        Err(TransportError::Decode(_)) => {}
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_store_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = client_for(format!("http://{}", addr));
    match client.query_paste("abc123").await {
        Err(TransportError::Network(_)) => {}
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn create_path_publishes_through_the_http_client() {
    let client = store_client().await;

    let mut controller = CreateController::new(PasteDraft::new("t", "c"));
    assert_eq!(
        controller.submit(&client).await,
        CreateOutcome::Published {
            key: "abc123".to_string(),
            navigation: Navigation::ViewPaste {
                key: "abc123".to_string()
            },
        }
    );

    let mut failing = CreateController::new(PasteDraft::new("explode", "c"));
    match failing.submit(&client).await {
        CreateOutcome::Failed { message } => {
            assert_eq!(message, "ERR_INTERNAL_SERVER_ERROR: Internal server error")
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn view_path_renders_or_redirects() {
    let client = store_client().await;

    let mut view = ViewController::new();
    assert_eq!(view.load(&client, "abc123").await, Some(ViewOutcome::Rendered));
    let paste = view.rendered().expect("rendered");
    assert!(paste.html.as_str().contains("math-display"));
    assert!(paste.expiry_label.starts_with("Will expire at "));

    for key in ["missing", "crash", "gateway", "broken"] {
        let mut view = ViewController::new();
        assert_eq!(
            view.load(&client, key).await,
            Some(ViewOutcome::Redirected(Navigation::CreatePage)),
            "key: {}",
            key
        );
        assert_eq!(view.phase(), &ViewPhase::Redirected);
    }
}
