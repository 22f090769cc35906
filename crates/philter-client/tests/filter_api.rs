//! Tests against an in-process stub of the Philter filter endpoint.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

use philter_client::{ClientError, PhilterClient};

async fn spawn_stub(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

fn redacting_stub() -> Router {
    Router::new().route(
        "/api/filter",
        post(|Query(params): Query<HashMap<String, String>>, body: String| async move {
            assert_eq!(params.get("p").map(String::as_str), Some("default"));
            let mut headers = HeaderMap::new();
            let assigned = match params.get("d") {
                Some(d) if !d.is_empty() => d.clone(),
                _ => "abc-123".to_string(),
            };
            headers.insert("x-document-id", assigned.parse().unwrap());
            (headers, body.replace("123-45-6789", "[SSN]"))
        }),
    )
}

#[tokio::test]
async fn test_filter_returns_text_and_assigned_id() {
    let endpoint = spawn_stub(redacting_stub()).await;
    let client = PhilterClient::builder(endpoint).build().unwrap();

    let result = client
        .filter(Some("doc-context-1"), None, "default", "My SSN is 123-45-6789.")
        .await
        .unwrap();

    assert_eq!(result.filtered_text, "My SSN is [SSN].");
    assert_eq!(result.document_id, "abc-123");
}

#[tokio::test]
async fn test_filter_keeps_caller_document_id() {
    let endpoint = spawn_stub(redacting_stub()).await;
    let client = PhilterClient::builder(endpoint).build().unwrap();

    let result = client
        .filter(None, Some("doc-9"), "default", "nothing sensitive")
        .await
        .unwrap();

    assert_eq!(result.document_id, "doc-9");
}

#[tokio::test]
async fn test_server_error_is_unexpected_status() {
    let app = Router::new().route(
        "/api/filter",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let endpoint = spawn_stub(app).await;
    let client = PhilterClient::builder(endpoint).build().unwrap();

    let err = client.filter(None, None, "default", "text").await;
    match err {
        Err(ClientError::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_http_error() {
    // Port 9 (discard) is not listening.
    let client = PhilterClient::builder("http://127.0.0.1:9/").build().unwrap();

    let err = client.filter(None, None, "default", "text").await;
    assert!(matches!(err, Err(ClientError::Http(_))));
}
