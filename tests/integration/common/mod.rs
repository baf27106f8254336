//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests:
//! - An in-process application router built from test configuration
//! - Init data signing helpers
//! - Request/response helpers

use std::env;
use std::sync::Once;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use miniapp_common::Config;
use serde_json::Value;
use tower::ServiceExt;

static INIT: Once = Once::new();

/// Test environment configuration
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub bot_token: String,
    pub max_age_seconds: u64,
}

impl TestConfig {
    pub fn from_env() -> Self {
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
        });

        Self {
            bot_token: env::var("TEST_TELEGRAM_BOT_TOKEN")
                .unwrap_or_else(|_| "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11".to_string()), // pragma: allowlist secret
            max_age_seconds: 3600,
        }
    }
}

/// In-process test application
pub struct TestApp {
    pub router: Router,
    pub config: TestConfig,
}

impl TestApp {
    /// Build the application with the default (lenient) missing-auth_date policy
    pub fn new() -> Self {
        Self::with_require_auth_date(false)
    }

    pub fn with_require_auth_date(require_auth_date: bool) -> Self {
        let config = TestConfig::from_env();
        let app_config = Config {
            telegram_bot_token: config.bot_token.clone(),
            auth_max_age_seconds: config.max_age_seconds,
            require_auth_date,
            rust_log: "miniapp=debug".to_string(),
            port: 0,
        };

        Self {
            router: miniapp_app::create_app(&app_config),
            config,
        }
    }

    /// Signed init data for `user`, issued `age_seconds` ago
    pub fn init_data(&self, user: &str, age_seconds: i64) -> String {
        let auth_date = (chrono::Utc::now().timestamp() - age_seconds).to_string();
        miniapp_auth::sign_init_data(
            [("user", user), ("auth_date", auth_date.as_str())],
            &self.config.bot_token,
        )
    }

    /// POST a JSON body and return status + parsed JSON
    pub async fn post_json(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?;
        self.send(request).await
    }

    /// GET with an optional Authorization header
    pub async fn get(&self, uri: &str, authorization: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        self.send(builder.body(Body::empty())?).await
    }

    async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Ok((status, json))
    }
}

/// Assert the generic client-facing rejection body
pub fn assert_unauthorized(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(body["error"]["message"], "Invalid or expired init data");
}
