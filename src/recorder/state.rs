//! Recording state and data model
//!
//! Defines the session state machine states, the encoder phase, the
//! output container configuration and the finalized artifact.

use serde::{Deserialize, Serialize};

/// Current state of the recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// No capture in flight
    Idle,
    /// Source list requested, waiting for the user to pick
    SelectingSource,
    /// A live stream is attached to the preview sink
    Previewing,
    /// Encoder is active, or flushing after a stop request
    Recording,
    /// Artifact handed to the persister, waiting for the outcome
    Saving,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Lifecycle of the encoder within one recording pass.
///
/// Mirrors the underlying recorder's own state: start only applies when
/// inactive, stop only while recording. Anything else is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderPhase {
    /// No encoder, or the pass has finished
    Inactive,
    /// Chunks are being emitted
    Recording,
    /// Stop requested; buffered chunks may still arrive until the flush
    /// completion fires
    Stopping,
}

/// Output container configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderConfig {
    /// MIME type handed to the encoder
    pub mime_type: String,

    /// File extension used for suggested filenames
    pub extension: String,

    /// Whether to capture audio alongside video
    pub capture_audio: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            mime_type: "video/webm; codecs=vp9".to_string(),
            extension: "webm".to_string(),
            capture_audio: false,
        }
    }
}

/// The finalized output of one recording pass
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Ordered concatenation of every chunk from the pass
    pub bytes: Vec<u8>,

    /// Container MIME type
    pub mime_type: String,

    /// Default filename offered by the save prompt
    pub suggested_name: String,
}

impl Artifact {
    /// Build an artifact from chunks in arrival order. Order is load
    /// bearing: reordering corrupts the container format.
    pub fn from_chunks(chunks: &[Vec<u8>], mime_type: &str, suggested_name: String) -> Self {
        let mut bytes = Vec::with_capacity(chunks.iter().map(Vec::len).sum());
        for chunk in chunks {
            bytes.extend_from_slice(chunk);
        }
        Self {
            bytes,
            mime_type: mime_type.to_string(),
            suggested_name,
        }
    }
}
