//! Storage errors for the host-side files (settings, tuning, high score)
//!
//! The simulation itself never fails; only disk I/O can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("high score file is {0} bytes, expected 4")]
    BadLength(usize),
}
