//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::context::AuthenticatedSession;
use crate::error::AuthError;
use crate::header::extract_init_data;
use crate::types::MiniAppIdentity;

/// Caller authenticated by `Authorization: tma <init data>`
#[derive(Debug)]
pub struct MiniAppAuth(pub AuthenticatedSession);

impl<S> FromRequestParts<S> for MiniAppAuth
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let init_data = extract_init_data(auth_header)?;
        let session = backend.authenticate(&init_data)?;

        Ok(MiniAppAuth(session))
    }
}

/// Authenticated caller whose init data carried a parsable identity.
///
/// Like `MiniAppAuth` but rejects sessions without a `user` with 401.
#[derive(Debug)]
pub struct MiniAppUser(pub MiniAppIdentity);

impl<S> FromRequestParts<S> for MiniAppUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let MiniAppAuth(session) = MiniAppAuth::from_request_parts(parts, state).await?;
        Ok(MiniAppUser(session.into_identity()?))
    }
}
