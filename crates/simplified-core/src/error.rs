//! Error types for `simplified-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The payload was not valid JSON or a value had the wrong type.
  #[error("decode error: {0}")]
  Decode(#[source] serde_json::Error),

  /// Serializing a record (or a diff pair) failed.
  #[error("encoding error: {0}")]
  Encode(#[source] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
