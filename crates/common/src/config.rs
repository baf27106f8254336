//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables once at start-up
//! and then passed down explicitly; nothing reads the environment on the
//! request path.

use anyhow::Result;
use std::env;

/// Default freshness window for signed init data (24 hours)
pub const DEFAULT_AUTH_MAX_AGE_SECONDS: u64 = 86_400;

/// Log directives used when `RUST_LOG` is unset
pub const DEFAULT_RUST_LOG: &str = "info,miniapp=debug";

#[derive(Clone)]
pub struct Config {
    /// Shared secret issued by the host (the bot token)
    pub telegram_bot_token: String,

    /// Maximum accepted age of `auth_date`, in seconds
    pub auth_max_age_seconds: u64,

    /// Reject payloads that carry no `auth_date` at all
    pub require_auth_date: bool,

    /// `tracing` filter directives for the log subscriber
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("TELEGRAM_BOT_TOKEN is required"))?;

        let config = Self {
            telegram_bot_token,
            auth_max_age_seconds: parse_max_age(env::var("TELEGRAM_AUTH_MAX_AGE_SECONDS").ok())?,
            require_auth_date: parse_flag(
                "TELEGRAM_AUTH_REQUIRE_AUTH_DATE",
                env::var("TELEGRAM_AUTH_REQUIRE_AUTH_DATE").ok(),
            )?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("telegram_bot_token", &"<redacted>")
            .field("auth_max_age_seconds", &self.auth_max_age_seconds)
            .field("require_auth_date", &self.require_auth_date)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

fn parse_max_age(raw: Option<String>) -> Result<u64> {
    match raw {
        None => Ok(DEFAULT_AUTH_MAX_AGE_SECONDS),
        Some(value) => value.trim().parse::<u64>().map_err(|_| {
            anyhow::anyhow!(
                "TELEGRAM_AUTH_MAX_AGE_SECONDS must be a non-negative integer, got {value:?}"
            )
        }),
    }
}

fn parse_flag(name: &str, raw: Option<String>) -> Result<bool> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") => Ok(true),
        Some("0") | Some("false") | Some("FALSE") | Some("no") => Ok(false),
        Some(other) => Err(anyhow::anyhow!(
            "{name} must be a boolean (true/false), got {other:?}"
        )),
    }
}
