//! Error types for `casefile-core`.

use thiserror::Error;

/// Raised when a stored or wire discriminant falls outside the closed
/// enumerations this crate defines. Unknown values are rejected at the
/// boundary rather than carried around as free-form strings.
#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown case status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown verdict: {0:?}")]
  UnknownVerdict(String),

  #[error("unknown confidence band: {0:?}")]
  UnknownConfidence(String),

  #[error("unknown sender role: {0:?}")]
  UnknownSender(String),

  #[error("unknown staff role: {0:?}")]
  UnknownStaffRole(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
