//! Webview host bridge
//!
//! The embedded webview owns the capture runtime: it enumerates sources,
//! binds streams, attaches the preview sink and runs the media encoder.
//! The Rust side drives it through the request/response bridge here; the
//! webview answers via the `fulfill_request` / `fail_request` commands.

pub mod catalog;
pub mod stream;

pub use catalog::WebviewCatalog;
pub use stream::WebviewStreams;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tokio::sync::oneshot;

use crate::recorder::error::{RecorderError, RecorderResult};

/// Event names the webview side listens for.
pub mod events {
    /// Enumerate capturable sources
    pub const ENUMERATE: &str = "recorder://enumerate";
    /// Bind a stream and attach the preview
    pub const ACQUIRE: &str = "recorder://acquire";
    /// Tear down a bound stream
    pub const RELEASE: &str = "recorder://release";
    /// Begin emitting chunks
    pub const ENCODER_START: &str = "recorder://encoder-start";
    /// Flush and finish the pass
    pub const ENCODER_STOP: &str = "recorder://encoder-stop";
    /// Session notices for transport-button feedback
    pub const NOTICE: &str = "recorder://notice";
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct BridgeEnvelope<T: Serialize + Clone> {
    request_id: u64,
    #[serde(flatten)]
    payload: T,
}

/// Request/response plumbing between the session and the webview.
///
/// Outbound requests carry a monotonic id; the webview resolves them by
/// invoking a command that lands in [`WebviewBridge::fulfill`] or
/// [`WebviewBridge::fail`].
pub struct WebviewBridge {
    app: AppHandle,
    pending: Mutex<HashMap<u64, oneshot::Sender<Result<serde_json::Value, String>>>>,
    next_request: AtomicU64,
}

impl WebviewBridge {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            pending: Mutex::new(HashMap::new()),
            next_request: AtomicU64::new(1),
        }
    }

    /// Send a request to the webview and await its reply.
    pub(crate) async fn request<T, P>(&self, event: &str, payload: P) -> RecorderResult<T>
    where
        T: DeserializeOwned,
        P: Serialize + Clone,
    {
        let request_id = self.next_request.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(request_id, tx);

        if let Err(err) = self.app.emit(event, BridgeEnvelope { request_id, payload }) {
            self.pending.lock().remove(&request_id);
            return Err(RecorderError::Bridge(err.to_string()));
        }

        let reply = rx
            .await
            .map_err(|_| RecorderError::Bridge("webview dropped the request".to_string()))?;
        let value = reply.map_err(RecorderError::Bridge)?;
        serde_json::from_value(value).map_err(|err| RecorderError::Bridge(err.to_string()))
    }

    /// Fire-and-forget notification to the webview.
    pub(crate) fn notify<P: Serialize + Clone>(&self, event: &str, payload: P) {
        if let Err(err) = self.app.emit(event, payload) {
            tracing::warn!("failed to emit {event}: {err}");
        }
    }

    /// Resolve a pending request with a successful payload. Returns false
    /// for an unknown request id.
    pub fn fulfill(&self, request_id: u64, payload: serde_json::Value) -> bool {
        self.complete(request_id, Ok(payload))
    }

    /// Resolve a pending request with an error message.
    pub fn fail(&self, request_id: u64, message: String) -> bool {
        self.complete(request_id, Err(message))
    }

    fn complete(&self, request_id: u64, reply: Result<serde_json::Value, String>) -> bool {
        match self.pending.lock().remove(&request_id) {
            Some(tx) => tx.send(reply).is_ok(),
            None => {
                tracing::warn!(request_id, "reply for unknown bridge request");
                false
            }
        }
    }
}
