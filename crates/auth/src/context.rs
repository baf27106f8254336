//! Session context for authenticated Mini App callers

use crate::error::AuthError;
use crate::types::MiniAppIdentity;

/// Outcome of a successful init data validation
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedSession {
    /// Identity from the signed `user` field, if it parsed
    pub identity: Option<MiniAppIdentity>,
    /// Issuance time of the init data, if the host sent one
    pub auth_date: Option<i64>,
}

impl AuthenticatedSession {
    pub fn new(identity: Option<MiniAppIdentity>, auth_date: Option<i64>) -> Self {
        Self {
            identity,
            auth_date,
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.identity.as_ref().map(|identity| identity.id)
    }

    /// Identity, or an auth error when the payload carried none
    pub fn require_identity(&self) -> Result<&MiniAppIdentity, AuthError> {
        self.identity.as_ref().ok_or(AuthError::MissingIdentity)
    }

    pub fn into_identity(self) -> Result<MiniAppIdentity, AuthError> {
        self.identity.ok_or(AuthError::MissingIdentity)
    }
}
