//! Stream binding and encoder control via the webview.
//!
//! Acquisition asks the webview to bind the source, attach the preview
//! sink and prepare its recorder. Encoder chunks and the flush completion
//! come back through the `encoder_data` / `encoder_stopped` commands, not
//! through these handles.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use super::{events, WebviewBridge};
use crate::capture::{CaptureSource, CaptureStream, MediaEncoder, StreamProvider};
use crate::recorder::error::{RecorderError, RecorderResult};
use crate::recorder::state::RecorderConfig;

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct AcquirePayload {
    stream_id: Uuid,
    source_id: String,
    mime_type: String,
    capture_audio: bool,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct StreamRef {
    stream_id: Uuid,
}

/// Stream provider backed by the webview's media runtime.
pub struct WebviewStreams {
    bridge: Arc<WebviewBridge>,
}

impl WebviewStreams {
    pub fn new(bridge: Arc<WebviewBridge>) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl StreamProvider for WebviewStreams {
    async fn acquire(
        &self,
        source: &CaptureSource,
        config: &RecorderConfig,
    ) -> RecorderResult<Box<dyn CaptureStream>> {
        let stream_id = Uuid::new_v4();
        self.bridge
            .request::<(), _>(
                events::ACQUIRE,
                AcquirePayload {
                    stream_id,
                    source_id: source.id.clone(),
                    mime_type: config.mime_type.clone(),
                    capture_audio: config.capture_audio,
                },
            )
            .await
            .map_err(|err| RecorderError::Acquisition(err.to_string()))?;

        Ok(Box::new(WebviewStream {
            bridge: self.bridge.clone(),
            stream_id,
            source_id: source.id.clone(),
        }))
    }
}

/// A live webview stream, released on drop.
pub struct WebviewStream {
    bridge: Arc<WebviewBridge>,
    stream_id: Uuid,
    source_id: String,
}

impl CaptureStream for WebviewStream {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn create_encoder(&self, _config: &RecorderConfig) -> RecorderResult<Box<dyn MediaEncoder>> {
        // The webview prepared its recorder when the stream was bound; the
        // handle here only drives it.
        Ok(Box::new(WebviewEncoder {
            bridge: self.bridge.clone(),
            stream_id: self.stream_id,
        }))
    }
}

impl Drop for WebviewStream {
    fn drop(&mut self) {
        self.bridge.notify(
            events::RELEASE,
            StreamRef {
                stream_id: self.stream_id,
            },
        );
    }
}

/// Drives the webview's recorder for one stream.
pub struct WebviewEncoder {
    bridge: Arc<WebviewBridge>,
    stream_id: Uuid,
}

#[async_trait]
impl MediaEncoder for WebviewEncoder {
    async fn start(&mut self) -> RecorderResult<()> {
        self.bridge.notify(
            events::ENCODER_START,
            StreamRef {
                stream_id: self.stream_id,
            },
        );
        Ok(())
    }

    async fn stop(&mut self) -> RecorderResult<()> {
        self.bridge.notify(
            events::ENCODER_STOP,
            StreamRef {
                stream_id: self.stream_id,
            },
        );
        Ok(())
    }
}
