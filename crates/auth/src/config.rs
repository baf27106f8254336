//! Authentication configuration

use miniapp_common::config::{Config, DEFAULT_AUTH_MAX_AGE_SECONDS};

/// Shared secret issued by the host out-of-band (the bot token).
///
/// `Debug` and `Display` never print the secret. Use [`BotToken::redacted`]
/// when a diagnostic identifier is needed in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw secret bytes, for keying the HMAC only
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }

    /// Short non-sensitive prefix for logs.
    ///
    /// Host tokens look like `<bot id>:<secret>`; the bot id is public.
    /// Anything else is cut to its first four characters.
    pub fn redacted(&self) -> String {
        match self.0.split_once(':') {
            Some((bot_id, _)) if !bot_id.is_empty() => format!("{bot_id}:***"),
            _ => {
                let prefix: String = self.0.chars().take(4).collect();
                format!("{prefix}***")
            }
        }
    }
}

impl std::fmt::Debug for BotToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BotToken").field(&self.redacted()).finish()
    }
}

impl std::fmt::Display for BotToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// What to do with a correctly signed payload that has no `auth_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingAuthDatePolicy {
    /// Accept, but report `AuthDateMissing` as a warning
    #[default]
    Warn,
    /// Fail with `AuthDateMissing`
    Reject,
}

/// Freshness window applied to `auth_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    /// Maximum accepted `now - auth_date`, in seconds (inclusive)
    pub max_age_seconds: u64,
    pub missing_auth_date: MissingAuthDatePolicy,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            max_age_seconds: DEFAULT_AUTH_MAX_AGE_SECONDS,
            missing_auth_date: MissingAuthDatePolicy::Warn,
        }
    }
}

impl FreshnessPolicy {
    pub fn with_max_age(max_age_seconds: u64) -> Self {
        Self {
            max_age_seconds,
            ..Self::default()
        }
    }

    pub fn requiring_auth_date(mut self) -> Self {
        self.missing_auth_date = MissingAuthDatePolicy::Reject;
        self
    }
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub bot_token: BotToken,
    pub freshness: FreshnessPolicy,
}

impl AuthConfig {
    pub fn new(bot_token: impl Into<String>, freshness: FreshnessPolicy) -> Self {
        Self {
            bot_token: BotToken::new(bot_token),
            freshness,
        }
    }
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        let missing_auth_date = if config.require_auth_date {
            MissingAuthDatePolicy::Reject
        } else {
            MissingAuthDatePolicy::Warn
        };

        Self {
            bot_token: BotToken::new(config.telegram_bot_token.clone()),
            freshness: FreshnessPolicy {
                max_age_seconds: config.auth_max_age_seconds,
                missing_auth_date,
            },
        }
    }
}
