//! Validation outcome types

use serde::Serialize;

use crate::types::MiniAppIdentity;

/// Every distinguishable validation outcome other than plain success.
///
/// Reported either as the fatal `failure_reason` of a [`ValidationResult`]
/// or, for the non-fatal kinds, in its `warnings`. Never shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureReason {
    /// Nothing to validate
    EmptyPayload,
    /// Server has no shared secret configured
    SecretMissing,
    /// No `hash` field in the payload
    SignatureFieldMissing,
    /// `auth_date` is older than the freshness window
    AuthDateExpired,
    /// `auth_date` is present but is not a decimal integer
    AuthDateInvalid,
    /// No `auth_date` field; fatal only under `MissingAuthDatePolicy::Reject`
    AuthDateMissing,
    /// Recomputed signature differs from the received one
    HashMismatch,
    /// Signed `user` field is not a valid identity; never fatal
    IdentityParseFailure,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::EmptyPayload => "EmptyPayload",
            FailureReason::SecretMissing => "SecretMissing",
            FailureReason::SignatureFieldMissing => "SignatureFieldMissing",
            FailureReason::AuthDateExpired => "AuthDateExpired",
            FailureReason::AuthDateInvalid => "AuthDateInvalid",
            FailureReason::AuthDateMissing => "AuthDateMissing",
            FailureReason::HashMismatch => "HashMismatch",
            FailureReason::IdentityParseFailure => "IdentityParseFailure",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of validating one init data payload.
///
/// `identity` may only be trusted as an authenticated principal when
/// `valid` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub identity: Option<MiniAppIdentity>,
    pub auth_date: Option<i64>,
    pub failure_reason: Option<FailureReason>,
    pub warnings: Vec<FailureReason>,
}

impl ValidationResult {
    pub(crate) fn rejected(reason: FailureReason) -> Self {
        Self {
            valid: false,
            identity: None,
            auth_date: None,
            failure_reason: Some(reason),
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn has_warning(&self, reason: FailureReason) -> bool {
        self.warnings.contains(&reason)
    }

    /// Identity, only if the payload validated
    pub fn authenticated_identity(&self) -> Option<&MiniAppIdentity> {
        if self.valid {
            self.identity.as_ref()
        } else {
            None
        }
    }
}
