use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::Result;

/// Encode binary frame data so it survives inside a JSON envelope.
pub fn to_transport_text(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Inverse of [`to_transport_text`].
pub fn from_transport_text(text: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}
