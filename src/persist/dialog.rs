//! Native save-dialog persister.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tauri::AppHandle;
use tauri_plugin_dialog::DialogExt;
use tokio::sync::oneshot;

use super::Persister;

/// Persister backed by the native save dialog and the local filesystem.
pub struct DialogPersister {
    app: AppHandle,
}

impl DialogPersister {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

#[async_trait]
impl Persister for DialogPersister {
    async fn prompt_destination(&self, suggested_name: &str) -> Option<PathBuf> {
        let (tx, rx) = oneshot::channel();
        self.app
            .dialog()
            .file()
            .set_file_name(suggested_name)
            .save_file(move |path| {
                let _ = tx.send(path);
            });

        match rx.await {
            Ok(Some(path)) => path.into_path().ok(),
            // Dialog dismissed, or its callback dropped without firing.
            _ => None,
        }
    }

    async fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        tokio::fs::write(path, bytes).await
    }
}
