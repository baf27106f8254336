//! Parsing of host-signed init data
//!
//! The payload is `application/x-www-form-urlencoded`. Values are
//! percent-decoded exactly once and then used verbatim in the data-check
//! string; keys are taken as-is.

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;

/// Field carrying the received signature
pub const HASH_FIELD: &str = "hash";
/// Field carrying the issuance timestamp (Unix seconds)
pub const AUTH_DATE_FIELD: &str = "auth_date";
/// Field carrying the JSON identity
pub const USER_FIELD: &str = "user";

/// Init data split into signed fields and the received signature.
///
/// Constructed per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// Every field except `hash`, ordered by key bytes
    fields: BTreeMap<String, String>,
    signature: Option<String>,
}

impl SignedPayload {
    /// Parse a raw init data string.
    ///
    /// Never fails: empty segments are skipped, a segment without `=` is a
    /// key with an empty value, and for repeated keys the first one wins.
    pub fn parse(raw: &str) -> Self {
        let mut fields = BTreeMap::new();
        let mut signature = None;

        for segment in raw.split('&').filter(|s| !s.is_empty()) {
            let (key, raw_value) = segment.split_once('=').unwrap_or((segment, ""));
            let value = decode_value(raw_value);

            if key == HASH_FIELD {
                if signature.is_none() {
                    signature = Some(value);
                } else {
                    tracing::debug!(key, "Ignoring duplicate init data field");
                }
                continue;
            }

            if fields.contains_key(key) {
                tracing::debug!(key, "Ignoring duplicate init data field");
                continue;
            }
            fields.insert(key.to_string(), value);
        }

        Self { fields, signature }
    }

    /// Signed fields, excluding `hash`
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The received signature (`hash` field)
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Raw `auth_date` value, if present
    pub fn auth_date_raw(&self) -> Option<&str> {
        self.get(AUTH_DATE_FIELD)
    }

    /// Raw `user` value, if present
    pub fn user_raw(&self) -> Option<&str> {
        self.get(USER_FIELD)
    }

    /// Canonical string the host signs.
    ///
    /// `key=value` lines sorted by key bytes, joined with `\n`, no trailing
    /// newline. `hash` is never part of it; every other field is, including
    /// the host's `signature` field.
    pub fn data_check_string(&self) -> String {
        build_data_check_string(
            self.fields
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        )
    }
}

/// Join already-sorted pairs into a data-check string.
pub(crate) fn build_data_check_string<'a>(
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut out = String::new();
    for (i, (key, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Decode a form value: `+` is a space, `%XX` escapes decode once.
fn decode_value(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
