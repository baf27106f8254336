//! Identity carried inside signed init data
//!
//! Untrusted until the payload signature has been verified.

use serde::{Deserialize, Serialize};

/// Claimed identity of the Mini App user, from the `user` field.
///
/// Only `id` is required; the host omits fields the user has not set.
/// Unknown keys are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniAppIdentity {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allows_write_to_pm: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MiniAppIdentity {
    /// Human-readable name: first + last name, falling back to the username
    pub fn display_name(&self) -> Option<String> {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full.is_empty() {
            Some(full)
        } else {
            self.username.clone()
        }
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium.unwrap_or(false)
    }
}

/// Parse the decoded `user` field.
///
/// Tries the value as-is first. Some clients percent-encode the JSON before
/// the transport encoding is applied, so a value that still carries escapes
/// gets one more decoding pass.
pub(crate) fn parse_identity(raw: &str) -> Result<MiniAppIdentity, serde_json::Error> {
    match serde_json::from_str::<MiniAppIdentity>(raw) {
        Ok(identity) => Ok(identity),
        Err(first_err) if raw.contains('%') => {
            let decoded = percent_encoding::percent_decode_str(raw).decode_utf8_lossy();
            serde_json::from_str::<MiniAppIdentity>(&decoded).map_err(|_| first_err)
        }
        Err(err) => Err(err),
    }
}
