mod common;

use axum::body::Body;
use common::Harness;
use http::{Method, Request, StatusCode};

#[tokio::test]
async fn health_check() {
    let harness = Harness::success().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("http://localhost/health")
        .body(Body::empty())
        .unwrap();

    let response = harness.call(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(harness.upstream_requests().is_empty());
}

#[tokio::test]
async fn health_check_does_not_need_an_api_key() {
    let harness = Harness::builder(mock_server::AppState::default())
        .api_key(None)
        .build()
        .await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("http://localhost/health")
        .body(Body::empty())
        .unwrap();

    let response = harness.call(request).await;
    assert_eq!(response.status(), StatusCode::OK);
}
