//! Live stream acquisition and the encoder seam.
//!
//! A `CaptureStream` owns the live capture exclusively; dropping it
//! releases the underlying stream. The encoder is the opaque external
//! capability that turns the stream into chunks. Data and flush-completion
//! notifications do not come back through these traits; they are
//! dispatched into the session as events.

use async_trait::async_trait;

use crate::capture::source::CaptureSource;
use crate::recorder::error::RecorderResult;
use crate::recorder::state::RecorderConfig;

/// Turns a chosen source into a live audio/video stream.
#[async_trait]
pub trait StreamProvider: Send + Sync {
    /// Acquire a live stream bound to `source`.
    ///
    /// Acquisition can fail when the source is no longer available or
    /// capture permission is denied; the session surfaces that without
    /// corrupting its state.
    async fn acquire(
        &self,
        source: &CaptureSource,
        config: &RecorderConfig,
    ) -> RecorderResult<Box<dyn CaptureStream>>;
}

/// A live capture stream, released when dropped.
pub trait CaptureStream: Send + Sync {
    /// Identifier of the source this stream is bound to.
    fn source_id(&self) -> &str;

    /// Create an encoder bound to this stream.
    fn create_encoder(&self, config: &RecorderConfig) -> RecorderResult<Box<dyn MediaEncoder>>;
}

/// Drives one encoder bound to a live stream.
#[async_trait]
pub trait MediaEncoder: Send + Sync {
    /// Begin emitting chunks.
    async fn start(&mut self) -> RecorderResult<()>;

    /// Request a flush. Buffered-but-unflushed data is still delivered
    /// before the completion notification fires.
    async fn stop(&mut self) -> RecorderResult<()>;
}
