//! Concrete authentication backend
//!
//! Wraps a shared `InitDataValidator` and turns its typed result into an
//! authenticated session or an `AuthError`.

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::context::AuthenticatedSession;
use crate::error::AuthError;
use crate::validator::InitDataValidator;

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthBackend {
    validator: Arc<InitDataValidator>,
}

impl AuthBackend {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            validator: Arc::new(InitDataValidator::new(config)),
        }
    }

    pub fn validator(&self) -> &InitDataValidator {
        &self.validator
    }

    /// Authenticate raw init data against the wall clock
    pub fn authenticate(&self, init_data: &str) -> Result<AuthenticatedSession, AuthError> {
        self.authenticate_at(init_data, chrono::Utc::now().timestamp())
    }

    /// Authenticate raw init data at an explicit Unix time
    pub fn authenticate_at(
        &self,
        init_data: &str,
        now: i64,
    ) -> Result<AuthenticatedSession, AuthError> {
        let result = self.validator.validate_at(init_data, now);

        // The validator already logged the specifics
        match result.failure_reason {
            Some(reason) => Err(AuthError::InvalidInitData(reason)),
            None => Ok(AuthenticatedSession::new(result.identity, result.auth_date)),
        }
    }
}
