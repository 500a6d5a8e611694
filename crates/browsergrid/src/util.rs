// Small byte and id helpers shared by callers and the library itself.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Encodes raw bytes as standard base64.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard base64 back to raw bytes.
pub fn from_base64(value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| Error::validation(format!("invalid base64 payload: {e}")))
}

/// Fresh correlation id for a request, suitable for log fields.
pub fn request_id() -> String {
    Uuid::new_v4().simple().to_string()
}
