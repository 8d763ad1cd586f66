//! Recorder error types.

use thiserror::Error;

/// Errors surfaced by the recording session and its collaborators.
///
/// Encoder start/stop issued in the wrong state is deliberately absent:
/// the session suppresses those as no-ops so UI double-clicks never
/// surface as failures.
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("source enumeration failed: {0}")]
    Enumeration(String),

    #[error("failed to acquire stream: {0}")]
    Acquisition(String),

    #[error("encoder error: {0}")]
    Encoder(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("webview bridge error: {0}")]
    Bridge(String),
}

/// Result type alias using RecorderError
pub type RecorderResult<T> = Result<T, RecorderError>;
