//! Base-58 rendering of account keys, signatures and hashes.
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CodecError {
    #[error("Invalid base-58 encoding: {0}")]
    InvalidEncoding(String),
}

/// Encode raw bytes as base-58 text.
///
/// Leading zero bytes are preserved as leading `1`s.
pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode base-58 `text` back to raw bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    bs58::decode(text)
        .into_vec()
        .map_err(|e| CodecError::InvalidEncoding(e.to_string()))
}
