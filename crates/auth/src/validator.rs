//! Validation of host-signed init data
//!
//! Pure function of the payload, the shared secret, the freshness policy and
//! the current time. Every malformed, forged or stale payload is reported as
//! a [`FailureReason`]; nothing here returns an error or panics on input.

use miniapp_common::{verify_hex_digest, HMAC_SHA256_LEN};

use crate::config::{AuthConfig, BotToken, FreshnessPolicy, MissingAuthDatePolicy};
use crate::payload::SignedPayload;
use crate::result::{FailureReason, ValidationResult};
use crate::signature::{compute_signature, derive_secret_key};
use crate::types::parse_identity;

/// Stage-1 key derived once from the bot token
#[derive(Clone)]
struct SigningKey {
    key: [u8; HMAC_SHA256_LEN],
    bot: String,
}

impl SigningKey {
    fn derive(token: &BotToken) -> Option<Self> {
        if token.is_empty() {
            return None;
        }
        Some(Self {
            key: derive_secret_key(token.expose()),
            bot: token.redacted(),
        })
    }
}

/// Freshness of a payload's `auth_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Freshness {
    Fresh { auth_date: i64 },
    Expired { auth_date: i64, age_seconds: i64 },
    Invalid,
    Missing,
}

fn check_freshness(raw: Option<&str>, max_age_seconds: u64, now: i64) -> Freshness {
    let Some(raw) = raw else {
        return Freshness::Missing;
    };

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Freshness::Invalid;
    }
    let Ok(auth_date) = raw.parse::<i64>() else {
        return Freshness::Invalid;
    };

    let age_seconds = now.saturating_sub(auth_date);
    // Future-dated payloads have a negative age and are never stale
    match u64::try_from(age_seconds) {
        Ok(age) if age > max_age_seconds => Freshness::Expired {
            auth_date,
            age_seconds,
        },
        _ => Freshness::Fresh { auth_date },
    }
}

/// Validate `init_data` against `bot_token` at Unix time `now`.
///
/// `valid` is true only when the recomputed signature matches and the
/// payload passes `policy`. The signature is always recomputed; a stale,
/// malformed or (under `Reject`) missing `auth_date` is reported ahead of a
/// mismatch, so `failure_reason` is `AuthDateExpired` for any old payload.
pub fn validate_init_data(
    init_data: &str,
    bot_token: &str,
    policy: &FreshnessPolicy,
    now: i64,
) -> ValidationResult {
    let key = SigningKey::derive(&BotToken::new(bot_token));
    evaluate(init_data, key.as_ref(), policy, now)
}

fn evaluate(
    init_data: &str,
    key: Option<&SigningKey>,
    policy: &FreshnessPolicy,
    now: i64,
) -> ValidationResult {
    if init_data.is_empty() {
        tracing::debug!(reason = %FailureReason::EmptyPayload, "Init data rejected");
        return ValidationResult::rejected(FailureReason::EmptyPayload);
    }

    let Some(key) = key else {
        tracing::error!(
            reason = %FailureReason::SecretMissing,
            "Bot token is not configured; all init data will be rejected"
        );
        return ValidationResult::rejected(FailureReason::SecretMissing);
    };

    let payload = SignedPayload::parse(init_data);
    let Some(received) = payload.signature() else {
        tracing::warn!(
            reason = %FailureReason::SignatureFieldMissing,
            bot = %key.bot,
            "Init data rejected"
        );
        return ValidationResult::rejected(FailureReason::SignatureFieldMissing);
    };

    let freshness = check_freshness(payload.auth_date_raw(), policy.max_age_seconds, now);
    let expected = compute_signature(&key.key, &payload.data_check_string());
    let authentic = verify_hex_digest(&expected, received);

    let mut warnings = Vec::new();
    let auth_date = match freshness {
        Freshness::Fresh { auth_date } => Some(auth_date),
        Freshness::Expired {
            auth_date,
            age_seconds,
        } => {
            tracing::warn!(
                reason = %FailureReason::AuthDateExpired,
                auth_date,
                age_seconds,
                max_age_seconds = policy.max_age_seconds,
                authentic,
                "Init data rejected"
            );
            return ValidationResult::rejected(FailureReason::AuthDateExpired);
        }
        Freshness::Invalid => {
            tracing::warn!(
                reason = %FailureReason::AuthDateInvalid,
                authentic,
                "Init data rejected"
            );
            return ValidationResult::rejected(FailureReason::AuthDateInvalid);
        }
        Freshness::Missing => match policy.missing_auth_date {
            MissingAuthDatePolicy::Reject => {
                tracing::warn!(
                    reason = %FailureReason::AuthDateMissing,
                    authentic,
                    "Init data rejected"
                );
                return ValidationResult::rejected(FailureReason::AuthDateMissing);
            }
            MissingAuthDatePolicy::Warn => {
                warnings.push(FailureReason::AuthDateMissing);
                None
            }
        },
    };

    if !authentic {
        tracing::warn!(
            reason = %FailureReason::HashMismatch,
            bot = %key.bot,
            fields = payload.fields().len(),
            "Init data rejected"
        );
        return ValidationResult::rejected(FailureReason::HashMismatch);
    }

    if auth_date.is_none() {
        tracing::warn!(
            reason = %FailureReason::AuthDateMissing,
            "Signed init data has no auth_date; freshness not enforced"
        );
    }

    let identity = payload
        .user_raw()
        .and_then(|raw| match parse_identity(raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!(
                    reason = %FailureReason::IdentityParseFailure,
                    error = %e,
                    "Signed init data carries an unparsable user field"
                );
                warnings.push(FailureReason::IdentityParseFailure);
                None
            }
        });

    tracing::debug!(
        user_id = identity.as_ref().map(|i| i.id),
        auth_date,
        "Init data validated"
    );

    ValidationResult {
        valid: true,
        identity,
        auth_date,
        failure_reason: None,
        warnings,
    }
}

/// Validator bound to one deployment's configuration.
///
/// Derives the stage-1 key once; cheap to clone and safe to share across
/// request handlers.
#[derive(Clone)]
pub struct InitDataValidator {
    key: Option<SigningKey>,
    freshness: FreshnessPolicy,
}

impl InitDataValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let key = SigningKey::derive(&config.bot_token);
        if key.is_none() {
            tracing::error!("InitDataValidator created without a bot token");
        }
        Self {
            key,
            freshness: config.freshness,
        }
    }

    pub fn freshness(&self) -> &FreshnessPolicy {
        &self.freshness
    }

    /// Validate against the wall clock
    #[mutants::skip] // Delegates to validate_at with the current time
    pub fn validate(&self, init_data: &str) -> ValidationResult {
        self.validate_at(init_data, chrono::Utc::now().timestamp())
    }

    /// Validate at an explicit Unix time
    pub fn validate_at(&self, init_data: &str, now: i64) -> ValidationResult {
        evaluate(init_data, self.key.as_ref(), &self.freshness, now)
    }
}

impl std::fmt::Debug for InitDataValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitDataValidator")
            .field("bot", &self.key.as_ref().map(|k| k.bot.as_str()))
            .field("freshness", &self.freshness)
            .finish()
    }
}
