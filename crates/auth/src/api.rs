//! Auth API handlers
//!
//! Implements:
//! - POST /v1/auth/telegram — Validate init data sent in the request body
//! - GET /v1/auth/whoami — Return the identity behind `Authorization: tma ...`

use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use miniapp_common::ValidatedJson;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::backend::AuthBackend;
use crate::error::AuthError;
use crate::extractors::MiniAppUser;
use crate::types::MiniAppIdentity;

/// Request body for `POST /v1/auth/telegram`
#[derive(Debug, Deserialize, Validate)]
pub struct ValidateInitDataRequest {
    #[serde(rename = "initData")]
    #[validate(length(min = 1, max = 8192))]
    pub init_data: String,
}

/// Response body for a successful `POST /v1/auth/telegram`
#[derive(Debug, Serialize)]
pub struct ValidateInitDataResponse {
    pub valid: bool,
    pub user: Option<MiniAppIdentity>,
    pub auth_date: Option<i64>,
}

/// POST /v1/auth/telegram — Validate init data sent in the request body
pub async fn validate_init_data(
    State(backend): State<AuthBackend>,
    ValidatedJson(request): ValidatedJson<ValidateInitDataRequest>,
) -> Result<Json<ValidateInitDataResponse>, AuthError> {
    let session = backend.authenticate(&request.init_data)?;

    Ok(Json(ValidateInitDataResponse {
        valid: true,
        user: session.identity,
        auth_date: session.auth_date,
    }))
}

/// Response shape for `GET /v1/auth/whoami`
#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub auth_method: &'static str,
    pub display_name: Option<String>,
    pub user: MiniAppIdentity,
}

/// GET /v1/auth/whoami — Return the identity of the current caller
pub async fn whoami(MiniAppUser(identity): MiniAppUser) -> Json<WhoamiResponse> {
    Json(WhoamiResponse {
        auth_method: "init_data",
        display_name: identity.display_name(),
        user: identity,
    })
}

/// Auth routes, mountable on any state that exposes an `AuthBackend`
pub fn routes<S>() -> Router<S>
where
    AuthBackend: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/v1/auth/telegram", post(validate_init_data))
        .route("/v1/auth/whoami", get(whoami))
}
