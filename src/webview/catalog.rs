//! Source enumeration via the webview.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::{events, WebviewBridge};
use crate::capture::{CaptureSource, SourceCatalog, SourceKind};
use crate::recorder::error::{RecorderError, RecorderResult};

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct EnumeratePayload {
    kinds: Vec<SourceKind>,
}

/// Catalog backed by the webview's capture runtime.
pub struct WebviewCatalog {
    bridge: Arc<WebviewBridge>,
}

impl WebviewCatalog {
    pub fn new(bridge: Arc<WebviewBridge>) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl SourceCatalog for WebviewCatalog {
    async fn enumerate(&self, kinds: &[SourceKind]) -> RecorderResult<Vec<CaptureSource>> {
        self.bridge
            .request(
                events::ENUMERATE,
                EnumeratePayload {
                    kinds: kinds.to_vec(),
                },
            )
            .await
            .map_err(|err| RecorderError::Enumeration(err.to_string()))
    }
}
