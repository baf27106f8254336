//! Cryptographic utilities shared across Mini App crates
//!
//! Provides HMAC-SHA256 signing and constant-time comparison to prevent
//! timing attacks on signature verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 digest in bytes
pub const HMAC_SHA256_LEN: usize = 32;

/// Compute `HMAC-SHA256(key, message)`.
///
/// HMAC accepts keys of any length (long keys are hashed, short keys are
/// padded), so construction cannot fail for SHA-256.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; HMAC_SHA256_LEN] {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts keys of any length"));
    mac.update(message);
    mac.finalize().into_bytes().into()
}

/// Compare two byte slices in constant time.
///
/// Slices of different length compare unequal without inspecting contents.
/// For equal lengths the running time does not depend on where (or whether)
/// the slices differ.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Verify a hex-encoded HMAC-SHA256 digest against the expected raw digest.
///
/// Accepts upper- or lowercase hex. Input that is not valid hex is compared
/// as an all-zero digest so malformed and wrong signatures take the same path.
pub fn verify_hex_digest(expected: &[u8; HMAC_SHA256_LEN], candidate_hex: &str) -> bool {
    let decoded = hex::decode(candidate_hex);
    let well_formed = decoded.is_ok();
    let candidate = decoded.unwrap_or_else(|_| vec![0u8; HMAC_SHA256_LEN]);

    constant_time_eq(expected, &candidate) & well_formed
}
