//! Error type for `grocer-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored document carried no id after decoding.
  #[error("document in {collection} has no id")]
  MissingId { collection: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
