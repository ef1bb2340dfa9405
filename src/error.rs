//! Error types for the outer surfaces (storage, settings)
//!
//! The simulation itself never fails; only loading and saving do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    /// Platform storage missing or refused the operation
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// Rules that would make a match unplayable
    #[error("invalid rules: {0}")]
    InvalidRules(String),
}

pub type ArenaResult<T> = Result<T, ArenaError>;
