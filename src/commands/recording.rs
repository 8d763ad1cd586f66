//! Recording-related Tauri commands
//!
//! The webview calls these for user actions (pick, start, stop) and for
//! encoder callbacks (data available, flush complete, source lost). Each
//! command is one dispatch into the session state machine.

use crate::capture::CaptureSource;
use crate::recorder::session::RecordingSession;
use crate::recorder::state::SessionState;
use std::sync::Arc;
use tauri::State;
use tokio::sync::Mutex;

/// Application state for recording
pub struct RecorderState {
    pub session: Arc<Mutex<RecordingSession>>,
}

impl RecorderState {
    pub fn new(session: RecordingSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}

/// Enumerate capturable screens and windows for the selection menu
#[tauri::command]
pub async fn list_sources(
    state: State<'_, RecorderState>,
) -> Result<Vec<CaptureSource>, String> {
    let mut session = state.session.lock().await;
    session.request_sources().await.map_err(|e| e.to_string())
}

/// Bind the session to the chosen source and start the preview
#[tauri::command]
pub async fn select_source(
    state: State<'_, RecorderState>,
    source: CaptureSource,
) -> Result<(), String> {
    let mut session = state.session.lock().await;
    session.select_source(source).await.map_err(|e| e.to_string())
}

/// Start a recording pass
#[tauri::command]
pub async fn start_recording(state: State<'_, RecorderState>) -> Result<(), String> {
    let mut session = state.session.lock().await;
    session.start().await.map_err(|e| e.to_string())
}

/// Stop the active recording pass and flush the encoder
#[tauri::command]
pub async fn stop_recording(state: State<'_, RecorderState>) -> Result<(), String> {
    let mut session = state.session.lock().await;
    session.stop().await.map_err(|e| e.to_string())
}

/// One encoder chunk became available
#[tauri::command]
pub async fn encoder_data(
    state: State<'_, RecorderState>,
    data: Vec<u8>,
) -> Result<(), String> {
    let mut session = state.session.lock().await;
    session.handle_chunk(data);
    Ok(())
}

/// The encoder finished flushing after a stop
#[tauri::command]
pub async fn encoder_stopped(state: State<'_, RecorderState>) -> Result<(), String> {
    let mut session = state.session.lock().await;
    session
        .handle_encoder_stopped()
        .await
        .map_err(|e| e.to_string())
}

/// The captured source disappeared (window closed, display detached)
#[tauri::command]
pub async fn source_lost(state: State<'_, RecorderState>) -> Result<(), String> {
    let mut session = state.session.lock().await;
    session.handle_source_lost().await;
    Ok(())
}

/// Get the current session state
#[tauri::command]
pub async fn get_session_state(
    state: State<'_, RecorderState>,
) -> Result<SessionState, String> {
    let session = state.session.lock().await;
    Ok(session.state())
}
