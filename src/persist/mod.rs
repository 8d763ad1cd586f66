//! Artifact persistence
//!
//! The session hands each finished artifact to a `Persister`, which owns
//! destination prompting and the actual write.

pub mod dialog;

pub use dialog::DialogPersister;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Prompts for a destination and writes artifact bytes.
#[async_trait]
pub trait Persister: Send + Sync {
    /// Ask the user where to save. `None` means the prompt was dismissed,
    /// which is a normal outcome, not an error.
    async fn prompt_destination(&self, suggested_name: &str) -> Option<PathBuf>;

    /// Write the artifact bytes to `path`. Failed writes are reported and
    /// never retried.
    async fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;
}
