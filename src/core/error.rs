//! Error types for core module
//!
//! Provides custom error types for calibration persistence and run
//! configuration handling.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Calibration file I/O error
    #[error("calibration I/O error: {0}")]
    CalibrationIo(#[from] std::io::Error),

    /// Calibration serialization/deserialization error
    #[error("calibration serialization error: {0}")]
    CalibrationFormat(#[from] serde_json::Error),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
