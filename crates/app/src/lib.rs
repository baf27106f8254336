//! Mini App backend composition root
//!
//! Composes the auth routes and shared infrastructure routes into a single
//! application.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{HeaderValue, Method},
    Router,
};
use miniapp_auth::{AuthBackend, AuthConfig};
use miniapp_common::Config;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tracing_subscriber::EnvFilter;

/// Request bodies above this size are rejected before reaching handlers
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Application state shared by all routes
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthBackend,
}

impl FromRef<AppState> for AuthBackend {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// Create the main application router with all routes
pub fn create_app(config: &Config) -> Router {
    let auth_config = AuthConfig::from(config);

    tracing::info!(
        bot = %auth_config.bot_token.redacted(),
        max_age_seconds = auth_config.freshness.max_age_seconds,
        missing_auth_date = ?auth_config.freshness.missing_auth_date,
        "Init data authentication configured"
    );

    let state = AppState {
        auth: AuthBackend::new(&auth_config),
    };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Mini App API v0.0.1-SNAPSHOT" }),
        )
        .merge(miniapp_auth::routes())
        .with_state(state)
}

/// Build a CORS layer from a comma-separated origin list
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Log filter from the configured `RUST_LOG` directives.
///
/// Falls back to `info` when the directives do not parse.
pub fn log_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_new(&config.rust_log).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid RUST_LOG {:?}: {e}", config.rust_log);
        EnvFilter::new("info")
    })
}

/// Cap request body size
pub fn body_limit_layer() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rust_log: &str) -> Config {
        Config {
            telegram_bot_token: "1:test".to_string(),
            auth_max_age_seconds: 3600,
            require_auth_date: false,
            rust_log: rust_log.to_string(),
            port: 3000,
        }
    }

    #[test]
    fn test_auth_backend_resolves_from_app_state() {
        let state = AppState {
            auth: AuthBackend::new(&AuthConfig::from(&config("info"))),
        };
        let backend = AuthBackend::from_ref(&state);
        assert!(std::ptr::eq(backend.validator(), state.auth.validator()));
        assert_eq!(backend.validator().freshness().max_age_seconds, 3600);
    }

    #[test]
    fn test_log_filter_uses_configured_directives() {
        let filter = log_filter(&config("warn,miniapp_auth=trace"));
        let rendered = filter.to_string();
        assert!(rendered.contains("miniapp_auth=trace"));
        assert!(rendered.contains("warn"));
    }

    #[test]
    fn test_log_filter_falls_back_on_garbage() {
        let filter = log_filter(&config("miniapp=loudest"));
        assert_eq!(filter.to_string(), "info");
    }
}
