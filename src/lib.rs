//! screenclip - pick a screen or window, preview it, record it, save the clip.
//!
//! This is the main library crate for the screenclip application. The
//! webview hosts the capture runtime and the preview; the Rust side owns
//! the recording session state machine and artifact persistence.

pub mod capture;
pub mod commands;
pub mod persist;
pub mod recorder;
pub mod webview;

use std::sync::Arc;

use commands::bridge::BridgeState;
use commands::recording::RecorderState;
use persist::DialogPersister;
use recorder::session::{RecordingSession, SystemClock};
use recorder::state::RecorderConfig;
use tauri::{Emitter, Manager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webview::{WebviewBridge, WebviewCatalog, WebviewStreams};

/// Initialize the application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "screenclip=debug,tauri=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting screenclip v{}", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let bridge = Arc::new(WebviewBridge::new(app.handle().clone()));

            let session = RecordingSession::new(
                Box::new(WebviewCatalog::new(bridge.clone())),
                Box::new(WebviewStreams::new(bridge.clone())),
                Box::new(DialogPersister::new(app.handle().clone())),
                Box::new(SystemClock),
                RecorderConfig::default(),
            );

            // Forward session notices to the webview for transport-button
            // feedback.
            let mut notices = session.subscribe();
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                while let Ok(notice) = notices.recv().await {
                    if let Err(err) = handle.emit(webview::events::NOTICE, &notice) {
                        tracing::warn!("failed to forward session notice: {err}");
                    }
                }
            });

            app.manage(RecorderState::new(session));
            app.manage(BridgeState { bridge });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Recording commands
            commands::recording::list_sources,
            commands::recording::select_source,
            commands::recording::start_recording,
            commands::recording::stop_recording,
            commands::recording::encoder_data,
            commands::recording::encoder_stopped,
            commands::recording::source_lost,
            commands::recording::get_session_state,
            // Bridge commands
            commands::bridge::fulfill_request,
            commands::bridge::fail_request,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
