//! Host capture capabilities consumed by the recorder
//!
//! The session only depends on the interfaces defined here; the production
//! implementations backed by the webview live in `crate::webview`.

pub mod source;
pub mod stream;

// Re-export the consumed interfaces
pub use source::{CaptureSource, SourceCatalog, SourceKind};
pub use stream::{CaptureStream, MediaEncoder, StreamProvider};
