//! Session state and orchestration.
//!
//! One `Session` owns the upload → transcribe → enrich pipeline for a
//! single surface: it validates intake, drives the transcription
//! provider (forwarding init progress), folds enrichment results into
//! the current [`TranscriptionRecord`], and publishes everything the
//! presentation layer needs as [`SessionEvent`]s on a broadcast channel.
//!
//! Concurrency rules, enforced here rather than by a queue:
//! - at most one transcription and one enrichment action pending at a
//!   time; a second trigger is rejected without touching state;
//! - a task finishing after [`Session::clear`] (or a newer upload) is
//!   stale and its result is discarded silently;
//! - provider initialization sharing is the provider's own contract.

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::enrich::EnrichmentBackend;
use crate::error::{SessionError, TranscribeError};
use crate::intake::{self, AcceptedFile, FileMeta};
use crate::notify::Notification;
use crate::provider::TranscriptionProvider;
use crate::record::{ActionKind, TranscriptionRecord};

/// Everything the presentation layer observes, in the order it happens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    FileAccepted { name: String },
    ModelProgress { percent: u8, label: String },
    TranscriptReady { text: String },
    ActionStarted { kind: ActionKind },
    ActionCompleted { kind: ActionKind },
    Cleared,
    Notice(Notification),
}

#[derive(Default)]
struct State {
    /// Bumped on every new upload and on clear; completions from older
    /// generations are discarded.
    generation: u64,
    file: Option<AcceptedFile>,
    record: Option<TranscriptionRecord>,
    transcribing: bool,
    pending_action: Option<ActionKind>,
}

#[derive(Clone)]
pub struct Session {
    provider: Arc<dyn TranscriptionProvider>,
    backend: Arc<dyn EnrichmentBackend>,
    state: Arc<Mutex<State>>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub fn new(provider: Arc<dyn TranscriptionProvider>, backend: Arc<dyn EnrichmentBackend>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            provider,
            backend,
            state: Arc::new(Mutex::new(State::default())),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the current record, if transcription has succeeded.
    pub fn record(&self) -> Option<TranscriptionRecord> {
        self.state().record.clone()
    }

    pub fn current_file(&self) -> Option<AcceptedFile> {
        self.state().file.clone()
    }

    pub fn is_transcribing(&self) -> bool {
        self.state().transcribing
    }

    pub fn pending_action(&self) -> Option<ActionKind> {
        self.state().pending_action
    }

    /// Handle one upload gesture: pick the first audio file from the
    /// batch, validate it, transcribe it, and seed the record. Intake
    /// and provider failures leave session state untouched.
    pub async fn upload(&self, files: &[FileMeta]) -> Result<(), SessionError> {
        let accepted = match self.accept(files) {
            Ok(accepted) => accepted,
            Err(err) => {
                self.notify_intake_failure(&err);
                return Err(err.into());
            }
        };

        let generation = {
            let mut state = self.state();
            if state.transcribing {
                return Err(SessionError::TranscriptionPending);
            }
            state.transcribing = true;
            state.generation += 1;
            // An action still in flight now belongs to a dead generation;
            // release its claim so its discarded result cannot wedge the
            // surface.
            state.pending_action = None;
            state.file = Some(accepted.clone());
            state.record = None;
            state.generation
        };

        info!("transcription started for {}", accepted.name());
        self.emit(SessionEvent::FileAccepted {
            name: accepted.name().to_string(),
        });

        let result = self.transcribe_watching_progress(&accepted).await;

        let mut state = self.state();
        if state.generation != generation {
            debug!("discarding stale transcription result for {}", accepted.name());
            return Ok(());
        }
        state.transcribing = false;

        let record = result.and_then(|text| {
            TranscriptionRecord::new(&text).ok_or(TranscribeError::EmptyTranscript)
        });
        match record {
            Ok(record) => {
                let text = record.original_text.clone();
                state.record = Some(record);
                drop(state);
                self.emit(SessionEvent::TranscriptReady { text });
                self.emit(SessionEvent::Notice(Notification::success(
                    "Transcription réussie !",
                    "Votre fichier audio a été transcrit avec succès.",
                )));
                Ok(())
            }
            Err(err) => {
                drop(state);
                warn!("transcription failed for {}: {err}", accepted.name());
                self.emit(SessionEvent::Notice(Notification::error(
                    "Erreur de transcription",
                    err.to_string(),
                )));
                Err(err.into())
            }
        }
    }

    /// Run one smart action against the current transcript. Rejected
    /// while the transcription or another action is pending; the record
    /// is untouched by a rejected attempt.
    pub async fn run_action(&self, kind: ActionKind) -> Result<(), SessionError> {
        let (generation, source) = {
            let mut state = self.state();
            if state.transcribing {
                return Err(SessionError::TranscriptionPending);
            }
            if state.pending_action.is_some() {
                return Err(SessionError::ActionPending);
            }
            let record = state.record.as_ref().ok_or(SessionError::NoTranscript)?;
            let source = record.original_text.clone();
            state.pending_action = Some(kind);
            (state.generation, source)
        };

        debug!("action {kind} started");
        self.emit(SessionEvent::ActionStarted { kind });

        let result = self.backend.run(kind, &source).await;

        let mut state = self.state();
        if state.generation != generation {
            debug!("discarding stale {kind} result");
            return Ok(());
        }
        state.pending_action = None;

        match result {
            Ok(derived) => {
                state.record = state.record.take().map(|r| r.apply(kind, &derived));
                drop(state);
                self.emit(SessionEvent::ActionCompleted { kind });
                self.emit(SessionEvent::Notice(Notification::success(
                    "Action réalisée !",
                    format!("{} effectué avec succès.", kind.label()),
                )));
                Ok(())
            }
            Err(err) => {
                drop(state);
                warn!("action {kind} failed: {err}");
                self.emit(SessionEvent::Notice(Notification::error(
                    "Erreur",
                    "Une erreur s'est produite lors du traitement.",
                )));
                Err(err.into())
            }
        }
    }

    /// Drop the current file and record. Pending tasks are not stopped;
    /// their eventual results become stale and are discarded.
    pub fn clear(&self) {
        {
            let mut state = self.state();
            state.generation += 1;
            state.file = None;
            state.record = None;
            state.transcribing = false;
            state.pending_action = None;
        }
        info!("session cleared");
        self.emit(SessionEvent::Cleared);
    }

    fn accept(&self, files: &[FileMeta]) -> Result<AcceptedFile, crate::error::IntakeError> {
        let candidate = intake::first_audio_file(files).ok_or_else(|| {
            let name = files.first().map(|f| f.name.clone()).unwrap_or_default();
            crate::error::IntakeError::UnsupportedFormat(name)
        })?;
        intake::validate(candidate)
    }

    fn notify_intake_failure(&self, err: &crate::error::IntakeError) {
        let notice = match err {
            crate::error::IntakeError::UnsupportedFormat(_) => Notification::error(
                "Format non supporté",
                "Veuillez sélectionner un fichier audio (MP3, WAV, M4A, OGG, FLAC, AAC)",
            ),
            crate::error::IntakeError::TooLarge { .. } => Notification::error(
                "Fichier trop volumineux",
                "La taille maximale autorisée est de 100MB",
            ),
        };
        self.emit(SessionEvent::Notice(notice));
    }

    /// Await the provider while forwarding init progress updates, so the
    /// presentation layer sees both through the same subscription.
    async fn transcribe_watching_progress(
        &self,
        file: &AcceptedFile,
    ) -> Result<String, TranscribeError> {
        let fut = self.provider.transcribe(file);
        tokio::pin!(fut);

        let mut progress = self.provider.progress_updates();
        loop {
            if let Some(updates) = progress.as_mut() {
                tokio::select! {
                    result = &mut fut => return result,
                    changed = updates.changed() => {
                        if changed.is_ok() {
                            let snapshot = *updates.borrow_and_update();
                            self.emit(SessionEvent::ModelProgress {
                                percent: snapshot.percent,
                                label: snapshot.label().to_string(),
                            });
                            continue;
                        }
                    }
                }
                // Progress channel closed; just await the transcription.
                progress = None;
            } else {
                return (&mut fut).await;
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, event: SessionEvent) {
        debug!("event: {event:?}");
        // No subscribers is fine; events are advisory.
        let _ = self.events.send(event);
    }
}
