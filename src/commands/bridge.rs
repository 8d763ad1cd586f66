//! Bridge resolution commands
//!
//! The webview answers outstanding bridge requests through these.

use std::sync::Arc;

use tauri::State;

use crate::webview::WebviewBridge;

/// Managed handle to the webview bridge
pub struct BridgeState {
    pub bridge: Arc<WebviewBridge>,
}

/// Resolve a bridge request with a successful payload
#[tauri::command]
pub async fn fulfill_request(
    state: State<'_, BridgeState>,
    request_id: u64,
    payload: serde_json::Value,
) -> Result<(), String> {
    if !state.bridge.fulfill(request_id, payload) {
        return Err(format!("no pending request {request_id}"));
    }
    Ok(())
}

/// Resolve a bridge request with an error message
#[tauri::command]
pub async fn fail_request(
    state: State<'_, BridgeState>,
    request_id: u64,
    message: String,
) -> Result<(), String> {
    if !state.bridge.fail(request_id, message) {
        return Err(format!("no pending request {request_id}"));
    }
    Ok(())
}
