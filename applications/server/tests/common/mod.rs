//! Common test utilities and fixtures
//!
//! Each `TestApp` owns a real SQLite file in a temp directory.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;
use wallet_server::{build_state, create_router, services::SignupRequest, AppState, ServerConfig};

pub const TEST_SECRET: &str = "test-secret-key";
pub const TEST_PASSWORD: &str = "TestPassword123!";

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    _temp_dir: TempDir,
}

impl TestApp {
    /// App whose new accounts start with the default seed range
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// App whose new accounts start with exactly `units` whole units
    pub async fn with_seed(units: i64) -> Self {
        Self::with_config(|config| {
            config.accounts.seed_min = Decimal::new(units, 0);
            config.accounts.seed_max = Decimal::new(units, 0);
        })
        .await
    }

    pub async fn with_config(customize: impl FnOnce(&mut ServerConfig)) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let mut config = ServerConfig::default();
        config.storage.database_url =
            format!("sqlite://{}", temp_dir.path().join("wallet.db").display());
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.auth.bcrypt_cost = 4;
        customize(&mut config);
        config.validate().expect("Invalid test config");

        let state = build_state(&config).await.expect("Failed to build state");
        let router = create_router(state.clone());

        Self {
            state,
            router,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed")
    }
}

/// Test fixture: a valid signup for `username`
pub fn signup_request(username: &str, first_name: &str, last_name: &str) -> SignupRequest {
    SignupRequest {
        username: username.to_string(),
        password: TEST_PASSWORD.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
