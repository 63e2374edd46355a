//! Error types for catalog construction.

use thiserror::Error;

/// Error raised while decoding the external song export format.
///
/// Each variant names the decoding stage that failed so a player can tell a
/// truncated paste from a corrupted payload.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The blob is not valid base64 after URL-safe normalization.
    #[error("base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not a valid raw DEFLATE stream.
    #[error("deflate decompression failed: {0}")]
    Inflate(#[source] std::io::Error),

    /// The decompressed payload is not UTF-8 text.
    #[error("decompressed payload is not valid UTF-8")]
    Encoding,

    /// The payload is not JSON of the expected shape.
    #[error("song export JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
