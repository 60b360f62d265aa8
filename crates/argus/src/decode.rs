//! Body decoders keyed by content type.

use serde_json::Value;

use crate::error::DecodeError;

/// Decodes a body according to its negotiated content type.
///
/// Any media type whose name contains `json` is handled by the JSON decoder
/// and produces a generic value. Every other media type has no decoder
/// registered and fails.
pub fn decode_body(content_type: &str, body: &[u8]) -> Result<Value, DecodeError> {
    if content_type.contains("json") {
        serde_json::from_slice(body).map_err(DecodeError::Json)
    } else {
        Err(DecodeError::NoDecoder(content_type.to_string()))
    }
}
