//! Base64url encoding without padding (RFC 7515 section 2)

use crate::error::JoseResult;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Encode bytes as unpadded base64url
#[inline]
#[must_use]
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode unpadded base64url
///
/// # Errors
/// Returns `JoseError::Format` if the input is not valid unpadded base64url.
#[inline]
pub fn decode(input: &str) -> JoseResult<Vec<u8>> {
    Ok(URL_SAFE_NO_PAD.decode(input)?)
}
