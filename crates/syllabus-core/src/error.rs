//! Error types for `syllabus-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A title in the batch is missing; nothing from the batch is merged.
  #[error("malformed batch: {0}")]
  MalformedBatch(String),

  #[error("empty batch: {0}")]
  EmptyBatch(String),

  #[error("could not decode parser output: {0}")]
  Parse(#[source] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
