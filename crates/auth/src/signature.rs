//! Two-stage HMAC-SHA256 chain used by the host to sign init data
//!
//! ```text
//! secret_key = HMAC-SHA256(key = bot_token, message = "WebAppData")
//! signature  = hex(HMAC-SHA256(key = secret_key, message = data_check_string))
//! ```

use miniapp_common::{hmac_sha256, HMAC_SHA256_LEN};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::payload::{build_data_check_string, HASH_FIELD};

/// Domain-separation constant fixed by the host
pub const WEB_APP_DATA: &[u8] = b"WebAppData";

/// Stage 1: derive the signing key from the shared secret.
pub fn derive_secret_key(bot_token: &str) -> [u8; HMAC_SHA256_LEN] {
    hmac_sha256(bot_token.as_bytes(), WEB_APP_DATA)
}

/// Stage 2: raw signature over a data-check string.
pub fn compute_signature(
    secret_key: &[u8; HMAC_SHA256_LEN],
    data_check_string: &str,
) -> [u8; HMAC_SHA256_LEN] {
    hmac_sha256(secret_key, data_check_string.as_bytes())
}

/// Lowercase hex signature of `data_check_string` under `bot_token`.
pub fn sign_data_check_string(bot_token: &str, data_check_string: &str) -> String {
    hex::encode(compute_signature(
        &derive_secret_key(bot_token),
        data_check_string,
    ))
}

/// Build init data the way the host does: sign the given fields and append
/// the `hash` field.
///
/// Values are percent-encoded for transport. A `hash` entry in `fields` is
/// ignored.
pub fn sign_init_data<'a>(
    fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    bot_token: &str,
) -> String {
    let mut pairs: Vec<(&str, &str)> = fields
        .into_iter()
        .filter(|(key, _)| *key != HASH_FIELD)
        .collect();
    pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let hash = sign_data_check_string(bot_token, &build_data_check_string(pairs.iter().copied()));

    let mut encoded: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, NON_ALPHANUMERIC)))
        .collect();
    encoded.push(format!("{HASH_FIELD}={hash}"));
    encoded.join("&")
}
