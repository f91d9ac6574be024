//! Test harness: the real router over mock dependencies.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so no socket is bound.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use smishguard_core::kernel::TestDependencies;
use smishguard_core::server::build_app;
use tower::ServiceExt;

pub struct TestApp {
    pub deps: TestDependencies,
    router: Router,
}

impl TestApp {
    pub fn new(deps: TestDependencies) -> Self {
        Self::with_request_timeout(deps, Duration::from_secs(10))
    }

    pub fn with_request_timeout(deps: TestDependencies, request_timeout: Duration) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let router = build_app(deps.server_deps(), request_timeout);
        Self { deps, router }
    }

    /// POST a JSON body and return the status plus the parsed JSON reply
    /// (`Value::Null` when the body is not JSON).
    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, path, Body::from(body.to_string())).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send(Method::GET, path, Body::empty()).await
    }

    async fn send(&self, method: Method, path: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }
}
