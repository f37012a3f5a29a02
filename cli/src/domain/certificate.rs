//! Certificate material decoding.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Decode base64 certificate text. Whitespace (line breaks from pasted PEM
/// bodies) is ignored.
///
/// # Errors
///
/// Returns an error if the text is not valid base64.
pub fn decode_certificate(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact)
}
