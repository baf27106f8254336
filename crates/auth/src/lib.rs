//! Mini App init data authentication
//!
//! Verifies the host's two-stage HMAC-SHA256 signature over init data,
//! enforces the `auth_date` freshness window, and extracts the signed user
//! identity. Axum extractors and routes work with any state implementing
//! `FromRef<S>` for `AuthBackend`.

pub mod api;
mod backend;
mod config;
mod context;
mod error;
mod extractors;
mod header;
pub mod payload;
mod result;
pub mod signature;
mod types;
mod validator;

pub use api::routes;
pub use backend::AuthBackend;
pub use config::{AuthConfig, BotToken, FreshnessPolicy, MissingAuthDatePolicy};
pub use context::AuthenticatedSession;
pub use error::AuthError;
pub use extractors::{MiniAppAuth, MiniAppUser};
pub use header::INIT_DATA_SCHEME;
pub use payload::SignedPayload;
pub use result::{FailureReason, ValidationResult};
pub use signature::{sign_data_check_string, sign_init_data};
pub use types::MiniAppIdentity;
pub use validator::{validate_init_data, InitDataValidator};
