//! Test helper utilities for webserver integration tests

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use resolver::{MockScoringClient, ResolverError, ScoringClient, StuffPlusResolver};
use serde_json::Value;
use shared::PredictResponse;
use tokio::net::TcpListener;
use tower::ServiceExt;

use webserver::{AppState, RealClientRegistry, build_router};

pub type TestState = AppState<MockScoringClient, RealClientRegistry>;

/// Scoring client whose remote model always answers with `stuff_plus`
pub fn remote_client(stuff_plus: f64) -> MockScoringClient {
    let mut client = MockScoringClient::new();
    client.expect_predict().returning(move |_| {
        Ok(PredictResponse {
            stuff_plus: Some(stuff_plus),
            percentile: None,
        })
    });
    client.expect_describe().return_const("mock scoring".to_string());
    client
}

/// Scoring client whose remote model is always down
pub fn failing_client() -> MockScoringClient {
    let mut client = MockScoringClient::new();
    client.expect_predict().returning(|_| {
        Err(ResolverError::NetworkError {
            endpoint: "http://scoring.test/predict".to_string(),
            message: "connection refused".to_string(),
        })
    });
    client.expect_describe().return_const("mock scoring".to_string());
    client
}

pub fn test_state(client: MockScoringClient) -> TestState {
    AppState::new(StuffPlusResolver::new(client), RealClientRegistry::new())
}

/// Send a request through the router and decode the JSON body (Null when empty)
pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    read_response(response).await
}

pub async fn read_response(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().unwrap_or_else(|| panic!("not a number: {actual}"));
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

/// Serve the router on an ephemeral local port
pub async fn spawn_server<C: ScoringClient + 'static>(state: AppState<C, RealClientRegistry>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let router = build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    address
}
