//! The recording session state machine
//!
//! Owns the recorder lifecycle: source selection, stream acquisition,
//! start/stop transitions, chunk accumulation and finalize-to-file. All
//! transitions run as reactions to discrete notifications — user commands
//! and collaborator completions — dispatched through the methods here, so
//! the transition logic lives in one place.

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::capture::{
    CaptureSource, CaptureStream, MediaEncoder, SourceCatalog, SourceKind, StreamProvider,
};
use crate::persist::Persister;
use crate::recorder::error::RecorderResult;
use crate::recorder::state::{Artifact, EncoderPhase, RecorderConfig, SessionState};

/// Wall-clock source, injected so filename generation is deterministic
/// under test.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// System clock backed by chrono
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        chrono::Utc::now().timestamp_millis() as u64
    }
}

/// Notices emitted as observable side effects of session transitions.
///
/// The UI uses these for transport-button feedback; nothing in the session
/// depends on anyone listening.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum SessionNotice {
    /// A source was selected; the label is pre-truncated for display
    SourceSelected { label: String },
    /// A recording pass started
    Started,
    /// Stop requested; the encoder is flushing
    Stopped,
    /// Artifact written to disk
    Saved { path: String },
    /// The user dismissed the save prompt
    SaveCancelled,
    /// Writing the artifact failed
    SaveFailed { message: String },
    /// The captured source surrendered mid-session
    SourceLost,
}

/// Drives capture from source selection through saved artifact.
///
/// Collaborators are injected; the session owns the one live stream handle
/// and the one encoder exclusively, and replaces either only after
/// releasing the old one.
pub struct RecordingSession {
    state: SessionState,
    config: RecorderConfig,
    selected: Option<CaptureSource>,
    stream: Option<Box<dyn CaptureStream>>,
    encoder: Option<Box<dyn MediaEncoder>>,
    phase: EncoderPhase,
    chunks: Vec<Vec<u8>>,

    /// Set when a pass is force-discarded; the discarded encoder still
    /// owes a flush completion, which must be swallowed rather than saved.
    discard_pending: bool,

    /// Correlation id of the current pass, for logs
    pass_id: Option<Uuid>,

    catalog: Box<dyn SourceCatalog>,
    streams: Box<dyn StreamProvider>,
    persister: Box<dyn Persister>,
    clock: Box<dyn Clock>,

    notice_tx: broadcast::Sender<SessionNotice>,
}

impl RecordingSession {
    pub fn new(
        catalog: Box<dyn SourceCatalog>,
        streams: Box<dyn StreamProvider>,
        persister: Box<dyn Persister>,
        clock: Box<dyn Clock>,
        config: RecorderConfig,
    ) -> Self {
        let (notice_tx, _) = broadcast::channel(32);
        Self {
            state: SessionState::Idle,
            config,
            selected: None,
            stream: None,
            encoder: None,
            phase: EncoderPhase::Inactive,
            chunks: Vec::new(),
            discard_pending: false,
            pass_id: None,
            catalog,
            streams,
            persister,
            clock,
            notice_tx,
        }
    }

    /// Get the current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The source the session is currently bound to, if any
    pub fn selected_source(&self) -> Option<&CaptureSource> {
        self.selected.as_ref()
    }

    /// Subscribe to session notices
    pub fn subscribe(&self) -> broadcast::Receiver<SessionNotice> {
        self.notice_tx.subscribe()
    }

    fn notify(&self, notice: SessionNotice) {
        let _ = self.notice_tx.send(notice);
    }

    fn encoder_active(&self) -> bool {
        self.phase != EncoderPhase::Inactive
    }

    /// Enumerate capturable sources for the selection menu.
    ///
    /// An empty list means no capturable surface exists right now; the
    /// session returns to its prior state and the UI simply has nothing
    /// to offer.
    pub async fn request_sources(&mut self) -> RecorderResult<Vec<CaptureSource>> {
        let prior = self.state;
        if prior == SessionState::Idle {
            self.state = SessionState::SelectingSource;
        }

        let kinds = [SourceKind::Window, SourceKind::Screen];
        let sources = match self.catalog.enumerate(&kinds).await {
            Ok(sources) => sources,
            Err(err) => {
                tracing::error!("source enumeration failed: {err}");
                self.state = prior;
                return Err(err);
            }
        };

        if sources.is_empty() {
            tracing::info!("no capturable sources available");
            self.state = prior;
        }
        Ok(sources)
    }

    /// Bind the session to a chosen source.
    ///
    /// Any prior stream is released before the new one is acquired, so at
    /// most one capture is live at any instant. Selecting while a pass is
    /// active discards that pass without saving.
    pub async fn select_source(&mut self, source: CaptureSource) -> RecorderResult<()> {
        let prior = self.state;

        if self.encoder_active() {
            tracing::warn!(
                source = %source.id,
                "new source selected mid-recording, discarding current pass"
            );
            if let Some(encoder) = self.encoder.as_mut() {
                if let Err(err) = encoder.stop().await {
                    tracing::debug!("encoder stop during discard failed: {err}");
                }
            }
            self.discard_pending = true;
            self.encoder = None;
            self.phase = EncoderPhase::Inactive;
            self.chunks.clear();
            self.pass_id = None;
        }

        // Release before acquire: the single-active-stream invariant.
        self.stream = None;

        match self.streams.acquire(&source, &self.config).await {
            Ok(stream) => {
                tracing::info!(source = %source.id, label = %source.label, "stream attached");
                self.stream = Some(stream);
                self.chunks.clear();
                self.notify(SessionNotice::SourceSelected {
                    label: source.short_label(),
                });
                self.selected = Some(source);
                self.state = SessionState::Previewing;
                Ok(())
            }
            Err(err) => {
                tracing::error!(source = %source.id, "stream acquisition failed: {err}");
                self.state = match prior {
                    // A discarded pass cannot be resumed once its encoder
                    // is gone.
                    SessionState::Recording | SessionState::Saving => SessionState::Idle,
                    other => other,
                };
                Err(err)
            }
        }
    }

    /// Begin a recording pass.
    ///
    /// A no-op when the encoder is already active or no stream is
    /// attached; double-clicks must not crash the session.
    pub async fn start(&mut self) -> RecorderResult<()> {
        if self.phase != EncoderPhase::Inactive {
            tracing::debug!("start ignored, encoder already active");
            return Ok(());
        }
        let Some(stream) = self.stream.as_ref() else {
            tracing::warn!("start ignored, no stream attached");
            return Ok(());
        };

        let mut encoder = stream.create_encoder(&self.config)?;
        encoder.start().await?;

        let pass = Uuid::new_v4();
        tracing::info!(%pass, source = stream.source_id(), "recording started");
        self.encoder = Some(encoder);
        self.phase = EncoderPhase::Recording;
        self.chunks.clear();
        self.pass_id = Some(pass);
        self.state = SessionState::Recording;
        self.notify(SessionNotice::Started);
        Ok(())
    }

    /// Stop the active pass and flush the encoder.
    ///
    /// A no-op when nothing is recording. The pass stays open until the
    /// flush completion arrives; chunks emitted in the meantime are still
    /// buffered.
    pub async fn stop(&mut self) -> RecorderResult<()> {
        if self.phase != EncoderPhase::Recording {
            tracing::debug!("stop ignored, encoder not recording");
            return Ok(());
        }
        if let Some(encoder) = self.encoder.as_mut() {
            encoder.stop().await?;
        }
        self.phase = EncoderPhase::Stopping;
        self.notify(SessionNotice::Stopped);
        Ok(())
    }

    /// Append one encoder chunk.
    ///
    /// Chunks arrive strictly in emission order and the artifact is their
    /// ordered concatenation.
    pub fn handle_chunk(&mut self, data: Vec<u8>) {
        match self.phase {
            EncoderPhase::Recording | EncoderPhase::Stopping => {
                tracing::trace!(len = data.len(), "chunk buffered");
                self.chunks.push(data);
            }
            EncoderPhase::Inactive => {
                tracing::debug!(len = data.len(), "chunk dropped, no active pass");
            }
        }
    }

    /// React to the encoder's flush completion: build the artifact and
    /// orchestrate the save.
    pub async fn handle_encoder_stopped(&mut self) -> RecorderResult<()> {
        if self.discard_pending {
            tracing::debug!("flush completion for a discarded pass, ignoring");
            self.discard_pending = false;
            return Ok(());
        }
        if self.phase == EncoderPhase::Inactive {
            tracing::debug!("spurious flush completion, ignoring");
            return Ok(());
        }

        self.encoder = None;
        self.phase = EncoderPhase::Inactive;
        self.state = SessionState::Saving;

        let suggested = format!(
            "clip-{}.{}",
            self.clock.now_millis(),
            self.config.extension
        );
        let artifact = Artifact::from_chunks(&self.chunks, &self.config.mime_type, suggested);
        let pass = self.pass_id.take();
        tracing::info!(
            pass = ?pass,
            chunks = self.chunks.len(),
            bytes = artifact.bytes.len(),
            "recording pass complete"
        );

        let outcome = self.save(&artifact).await;

        self.chunks.clear();
        self.state = SessionState::Idle;
        outcome
    }

    /// The captured surface disappeared (window closed, display
    /// detached). Treated as an implicit stop: whatever was captured so
    /// far is still saved once the flush completes — a partial clip beats
    /// silent data loss.
    pub async fn handle_source_lost(&mut self) {
        tracing::warn!("capture source surrendered");
        self.stream = None;
        self.selected = None;
        self.notify(SessionNotice::SourceLost);

        match self.phase {
            EncoderPhase::Recording => {
                if let Some(encoder) = self.encoder.as_mut() {
                    if let Err(err) = encoder.stop().await {
                        tracing::debug!("encoder stop after source loss failed: {err}");
                    }
                }
                self.phase = EncoderPhase::Stopping;
            }
            // Flush already on its way
            EncoderPhase::Stopping => {}
            EncoderPhase::Inactive => {
                self.state = SessionState::Idle;
            }
        }
    }

    async fn save(&self, artifact: &Artifact) -> RecorderResult<()> {
        let Some(path) = self
            .persister
            .prompt_destination(&artifact.suggested_name)
            .await
        else {
            tracing::info!("save cancelled, discarding artifact");
            self.notify(SessionNotice::SaveCancelled);
            return Ok(());
        };

        match self.persister.write(&path, &artifact.bytes).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "video saved");
                self.notify(SessionNotice::Saved {
                    path: path.display().to_string(),
                });
                Ok(())
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "failed to write artifact: {err}");
                self.notify(SessionNotice::SaveFailed {
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::error::RecorderError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    #[derive(Default)]
    struct Log(Mutex<Vec<String>>);

    impl Log {
        fn push(&self, entry: impl Into<String>) {
            self.0.lock().push(entry.into());
        }

        fn entries(&self) -> Vec<String> {
            self.0.lock().clone()
        }
    }

    struct StubCatalog {
        sources: Vec<CaptureSource>,
        fail: bool,
    }

    #[async_trait]
    impl SourceCatalog for StubCatalog {
        async fn enumerate(&self, _kinds: &[SourceKind]) -> RecorderResult<Vec<CaptureSource>> {
            if self.fail {
                return Err(RecorderError::Enumeration("backend gone".to_string()));
            }
            Ok(self.sources.clone())
        }
    }

    struct StubStreams {
        log: Arc<Log>,
        fail: bool,
    }

    #[async_trait]
    impl StreamProvider for StubStreams {
        async fn acquire(
            &self,
            source: &CaptureSource,
            _config: &RecorderConfig,
        ) -> RecorderResult<Box<dyn CaptureStream>> {
            if self.fail {
                return Err(RecorderError::Acquisition(format!("{} is gone", source.id)));
            }
            self.log.push(format!("acquire {}", source.id));
            Ok(Box::new(StubStream {
                id: source.id.clone(),
                log: self.log.clone(),
            }))
        }
    }

    struct StubStream {
        id: String,
        log: Arc<Log>,
    }

    impl CaptureStream for StubStream {
        fn source_id(&self) -> &str {
            &self.id
        }

        fn create_encoder(
            &self,
            _config: &RecorderConfig,
        ) -> RecorderResult<Box<dyn MediaEncoder>> {
            Ok(Box::new(StubEncoder {
                log: self.log.clone(),
            }))
        }
    }

    impl Drop for StubStream {
        fn drop(&mut self) {
            self.log.push(format!("release {}", self.id));
        }
    }

    struct StubEncoder {
        log: Arc<Log>,
    }

    #[async_trait]
    impl MediaEncoder for StubEncoder {
        async fn start(&mut self) -> RecorderResult<()> {
            self.log.push("encoder start");
            Ok(())
        }

        async fn stop(&mut self) -> RecorderResult<()> {
            self.log.push("encoder stop");
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct StubPersister {
        destination: Option<PathBuf>,
        prompts: Arc<Mutex<Vec<String>>>,
        written: Arc<Mutex<Option<(PathBuf, Vec<u8>)>>>,
        fail_write: bool,
    }

    #[async_trait]
    impl Persister for StubPersister {
        async fn prompt_destination(&self, suggested_name: &str) -> Option<PathBuf> {
            self.prompts.lock().push(suggested_name.to_string());
            self.destination.clone()
        }

        async fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
            if self.fail_write {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            *self.written.lock() = Some((path.to_path_buf(), bytes.to_vec()));
            Ok(())
        }
    }

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> u64 {
            self.0
        }
    }

    fn screen(id: &str, label: &str) -> CaptureSource {
        CaptureSource {
            id: id.to_string(),
            label: label.to_string(),
            kind: SourceKind::Screen,
        }
    }

    fn session_with(
        sources: Vec<CaptureSource>,
        destination: Option<PathBuf>,
    ) -> (RecordingSession, Arc<Log>, StubPersister) {
        let log = Arc::new(Log::default());
        let persister = StubPersister {
            destination,
            ..Default::default()
        };
        let session = RecordingSession::new(
            Box::new(StubCatalog {
                sources,
                fail: false,
            }),
            Box::new(StubStreams {
                log: log.clone(),
                fail: false,
            }),
            Box::new(persister.clone()),
            Box::new(FixedClock(1234)),
            RecorderConfig::default(),
        );
        (session, log, persister)
    }

    #[tokio::test]
    async fn records_and_saves_ordered_chunks() {
        let (mut session, _log, persister) = session_with(
            vec![screen("screen:0", "Entire Screen")],
            Some(PathBuf::from("/tmp/out.webm")),
        );

        let sources = session.request_sources().await.unwrap();
        assert_eq!(session.state(), SessionState::SelectingSource);
        assert_eq!(sources.len(), 1);

        session.select_source(sources[0].clone()).await.unwrap();
        assert_eq!(session.state(), SessionState::Previewing);

        session.start().await.unwrap();
        assert_eq!(session.state(), SessionState::Recording);

        session.handle_chunk(b"A".to_vec());
        session.handle_chunk(b"B".to_vec());
        session.handle_chunk(b"C".to_vec());
        session.stop().await.unwrap();
        session.handle_encoder_stopped().await.unwrap();

        let (path, bytes) = persister.written.lock().clone().expect("artifact written");
        assert_eq!(path, PathBuf::from("/tmp/out.webm"));
        assert_eq!(bytes, b"ABC".to_vec());
        assert_eq!(persister.prompts.lock().as_slice(), ["clip-1234.webm"]);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.chunks.is_empty());
    }

    #[tokio::test]
    async fn start_is_idempotent_while_recording() {
        let (mut session, log, _) = session_with(vec![screen("screen:0", "Entire Screen")], None);
        let sources = session.request_sources().await.unwrap();
        session.select_source(sources[0].clone()).await.unwrap();
        session.start().await.unwrap();
        session.handle_chunk(b"A".to_vec());

        session.start().await.unwrap();

        assert_eq!(session.state(), SessionState::Recording);
        assert_eq!(session.chunks, vec![b"A".to_vec()]);
        let starts = log
            .entries()
            .iter()
            .filter(|e| *e == "encoder start")
            .count();
        assert_eq!(starts, 1);
    }

    #[tokio::test]
    async fn stop_without_active_pass_is_a_noop() {
        let (mut session, log, persister) = session_with(vec![], None);

        session.stop().await.unwrap();

        assert_eq!(session.state(), SessionState::Idle);
        assert!(log.entries().is_empty());
        assert!(persister.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn reselecting_releases_previous_stream_first() {
        let (mut session, log, _) = session_with(
            vec![
                screen("screen:0", "Entire Screen"),
                screen("screen:1", "Second Screen"),
            ],
            None,
        );
        let sources = session.request_sources().await.unwrap();

        session.select_source(sources[0].clone()).await.unwrap();
        session.select_source(sources[1].clone()).await.unwrap();

        assert_eq!(
            log.entries(),
            vec!["acquire screen:0", "release screen:0", "acquire screen:1"]
        );
        assert_eq!(session.selected_source().unwrap().id, "screen:1");
    }

    #[tokio::test]
    async fn cancelled_save_discards_artifact() {
        let (mut session, _log, persister) =
            session_with(vec![screen("screen:0", "Entire Screen")], None);
        let sources = session.request_sources().await.unwrap();
        session.select_source(sources[0].clone()).await.unwrap();
        session.start().await.unwrap();
        session.handle_chunk(b"A".to_vec());
        session.stop().await.unwrap();

        session.handle_encoder_stopped().await.unwrap();

        assert!(persister.written.lock().is_none());
        assert_eq!(persister.prompts.lock().len(), 1);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.chunks.is_empty());
    }

    #[tokio::test]
    async fn empty_pass_still_prompts_for_destination() {
        let (mut session, _log, persister) = session_with(
            vec![screen("screen:0", "Entire Screen")],
            Some(PathBuf::from("/tmp/empty.webm")),
        );
        let sources = session.request_sources().await.unwrap();
        session.select_source(sources[0].clone()).await.unwrap();
        session.start().await.unwrap();
        session.stop().await.unwrap();

        session.handle_encoder_stopped().await.unwrap();

        assert_eq!(persister.prompts.lock().as_slice(), ["clip-1234.webm"]);
        let (_, bytes) = persister.written.lock().clone().expect("artifact written");
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn failed_acquisition_keeps_prior_state() {
        let log = Arc::new(Log::default());
        let persister = StubPersister::default();
        let mut session = RecordingSession::new(
            Box::new(StubCatalog {
                sources: vec![screen("screen:0", "Entire Screen")],
                fail: false,
            }),
            Box::new(StubStreams {
                log: log.clone(),
                fail: true,
            }),
            Box::new(persister),
            Box::new(FixedClock(1234)),
            RecorderConfig::default(),
        );

        let sources = session.request_sources().await.unwrap();
        let err = session.select_source(sources[0].clone()).await.unwrap_err();

        assert!(matches!(err, RecorderError::Acquisition(_)));
        assert_eq!(session.state(), SessionState::SelectingSource);
        assert!(session.stream.is_none());

        // Start with no stream attached stays a quiet no-op.
        session.start().await.unwrap();
        assert_eq!(session.state(), SessionState::SelectingSource);
    }

    #[tokio::test]
    async fn reselect_mid_recording_discards_pass() {
        let (mut session, log, persister) = session_with(
            vec![
                screen("screen:0", "Entire Screen"),
                screen("screen:1", "Second Screen"),
            ],
            Some(PathBuf::from("/tmp/out.webm")),
        );
        let sources = session.request_sources().await.unwrap();
        session.select_source(sources[0].clone()).await.unwrap();
        session.start().await.unwrap();
        session.handle_chunk(b"A".to_vec());

        session.select_source(sources[1].clone()).await.unwrap();

        assert_eq!(session.state(), SessionState::Previewing);
        assert!(session.chunks.is_empty());
        assert_eq!(
            log.entries(),
            vec![
                "acquire screen:0",
                "encoder start",
                "encoder stop",
                "release screen:0",
                "acquire screen:1",
            ]
        );

        // The discarded pass's flush completion must not trigger a save.
        session.handle_encoder_stopped().await.unwrap();
        assert!(persister.prompts.lock().is_empty());
        assert_eq!(session.state(), SessionState::Previewing);
    }

    #[tokio::test]
    async fn source_loss_saves_partial_clip() {
        let (mut session, log, persister) = session_with(
            vec![screen("window:7", "Editor")],
            Some(PathBuf::from("/tmp/partial.webm")),
        );
        let sources = session.request_sources().await.unwrap();
        session.select_source(sources[0].clone()).await.unwrap();
        session.start().await.unwrap();
        session.handle_chunk(b"A".to_vec());
        session.handle_chunk(b"B".to_vec());

        session.handle_source_lost().await;

        assert!(session.stream.is_none());
        assert!(log.entries().contains(&"release window:7".to_string()));

        session.handle_encoder_stopped().await.unwrap();

        let (path, bytes) = persister.written.lock().clone().expect("partial clip saved");
        assert_eq!(path, PathBuf::from("/tmp/partial.webm"));
        assert_eq!(bytes, b"AB".to_vec());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn empty_enumeration_returns_to_prior_state() {
        let (mut session, _log, _) = session_with(vec![], None);

        let sources = session.request_sources().await.unwrap();

        assert!(sources.is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn enumeration_failure_restores_prior_state() {
        let log = Arc::new(Log::default());
        let mut session = RecordingSession::new(
            Box::new(StubCatalog {
                sources: vec![],
                fail: true,
            }),
            Box::new(StubStreams { log, fail: false }),
            Box::new(StubPersister::default()),
            Box::new(FixedClock(1234)),
            RecorderConfig::default(),
        );

        let err = session.request_sources().await.unwrap_err();

        assert!(matches!(err, RecorderError::Enumeration(_)));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn write_failure_reports_and_resets() {
        let log = Arc::new(Log::default());
        let persister = StubPersister {
            destination: Some(PathBuf::from("/tmp/out.webm")),
            fail_write: true,
            ..Default::default()
        };
        let mut session = RecordingSession::new(
            Box::new(StubCatalog {
                sources: vec![screen("screen:0", "Entire Screen")],
                fail: false,
            }),
            Box::new(StubStreams { log, fail: false }),
            Box::new(persister.clone()),
            Box::new(FixedClock(1234)),
            RecorderConfig::default(),
        );
        let sources = session.request_sources().await.unwrap();
        session.select_source(sources[0].clone()).await.unwrap();
        session.start().await.unwrap();
        session.handle_chunk(b"A".to_vec());
        session.stop().await.unwrap();

        let err = session.handle_encoder_stopped().await.unwrap_err();

        assert!(matches!(err, RecorderError::Io(_)));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.chunks.is_empty());
    }

    #[tokio::test]
    async fn notices_follow_a_full_pass() {
        let (mut session, _log, _) = session_with(
            vec![screen(
                "window:9",
                "a window title that goes on far longer than any button",
            )],
            Some(PathBuf::from("/tmp/out.webm")),
        );
        let mut notices = session.subscribe();

        let sources = session.request_sources().await.unwrap();
        session.select_source(sources[0].clone()).await.unwrap();
        session.start().await.unwrap();
        session.handle_chunk(b"A".to_vec());
        session.stop().await.unwrap();
        session.handle_encoder_stopped().await.unwrap();

        let mut seen = Vec::new();
        while let Ok(notice) = notices.try_recv() {
            seen.push(notice);
        }
        assert!(matches!(
            &seen[0],
            SessionNotice::SourceSelected { label } if label == "a window title that goes on fa..."
        ));
        assert!(matches!(seen[1], SessionNotice::Started));
        assert!(matches!(seen[2], SessionNotice::Stopped));
        assert!(matches!(&seen[3], SessionNotice::Saved { path } if path == "/tmp/out.webm"));
    }

    /// End to end against a real directory: bytes land on disk under the
    /// suggested name, and a cancelled prompt writes nothing.
    mod disk {
        use super::*;
        use tempfile::tempdir;

        struct SaveToDir {
            dir: PathBuf,
            cancel: bool,
        }

        #[async_trait]
        impl Persister for SaveToDir {
            async fn prompt_destination(&self, suggested_name: &str) -> Option<PathBuf> {
                if self.cancel {
                    None
                } else {
                    Some(self.dir.join(suggested_name))
                }
            }

            async fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
                tokio::fs::write(path, bytes).await
            }
        }

        async fn run_pass(persister: SaveToDir) {
            let log = Arc::new(Log::default());
            let mut session = RecordingSession::new(
                Box::new(StubCatalog {
                    sources: vec![screen("screen:0", "Entire Screen")],
                    fail: false,
                }),
                Box::new(StubStreams { log, fail: false }),
                Box::new(persister),
                Box::new(FixedClock(1234)),
                RecorderConfig::default(),
            );
            let sources = session.request_sources().await.unwrap();
            session.select_source(sources[0].clone()).await.unwrap();
            session.start().await.unwrap();
            session.handle_chunk(b"AB".to_vec());
            session.handle_chunk(b"CD".to_vec());
            session.stop().await.unwrap();
            session.handle_encoder_stopped().await.unwrap();
        }

        #[tokio::test]
        async fn saved_clip_lands_on_disk() {
            let dir = tempdir().unwrap();
            run_pass(SaveToDir {
                dir: dir.path().to_path_buf(),
                cancel: false,
            })
            .await;

            let saved = std::fs::read(dir.path().join("clip-1234.webm")).unwrap();
            assert_eq!(saved, b"ABCD".to_vec());
        }

        #[tokio::test]
        async fn cancelled_prompt_leaves_directory_empty() {
            let dir = tempdir().unwrap();
            run_pass(SaveToDir {
                dir: dir.path().to_path_buf(),
                cancel: true,
            })
            .await;

            assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        }
    }
}
