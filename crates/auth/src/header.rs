//! Authorization header parsing

use axum::http::HeaderValue;

use crate::error::AuthError;

/// Authorization scheme carrying raw Mini App init data
pub const INIT_DATA_SCHEME: &str = "tma";

/// Extract init data from an `Authorization: tma <init data>` header
pub(crate) fn extract_init_data(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    let (scheme, init_data) = header_str
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthorizationFormat)?;

    if !scheme.eq_ignore_ascii_case(INIT_DATA_SCHEME) {
        return Err(AuthError::InvalidAuthorizationFormat);
    }

    let init_data = init_data.trim();
    if init_data.is_empty() {
        return Err(AuthError::InvalidAuthorizationFormat);
    }

    Ok(init_data.to_string())
}
