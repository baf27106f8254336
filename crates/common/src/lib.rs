//! Shared utilities, configuration, and error handling for the Mini App backend
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration management following 12-factor principles
//! - Request error rendering
//! - HMAC-SHA256 and constant-time comparison primitives
//! - Request extractors

pub mod config;
pub mod crypto;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use crypto::{constant_time_eq, hmac_sha256, verify_hex_digest, HMAC_SHA256_LEN};
pub use error::Error;
pub use extractors::{ValidatedJson, ValidatedJsonRejection};
