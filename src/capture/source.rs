//! Capture source types and the enumeration interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::recorder::error::RecorderResult;

/// Kind of surface a capture source exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// An entire display
    Screen,
    /// A single application window
    Window,
}

/// A selectable screen or window whose video can be streamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSource {
    /// Opaque identifier understood by the stream provider
    pub id: String,

    /// Human-readable label
    pub label: String,

    /// Whether this is a whole screen or a single window
    pub kind: SourceKind,
}

impl CaptureSource {
    /// Label shortened for button feedback. Window titles can be
    /// arbitrarily long; anything past 30 characters is truncated with an
    /// ellipsis.
    pub fn short_label(&self) -> String {
        const MAX_LABEL_CHARS: usize = 30;
        if self.label.chars().count() > MAX_LABEL_CHARS {
            let head: String = self.label.chars().take(MAX_LABEL_CHARS).collect();
            format!("{}...", head)
        } else {
            self.label.clone()
        }
    }
}

/// Enumerates capturable screens and windows.
///
/// May return an empty list when no capturable surface exists; the session
/// treats that as "nothing to select", not an error.
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    async fn enumerate(&self, kinds: &[SourceKind]) -> RecorderResult<Vec<CaptureSource>>;
}
