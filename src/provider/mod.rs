//! Transcription providers.
//!
//! Two interchangeable variants satisfy the same contract: the
//! model-pipeline provider ([`pipeline::PipelineProvider`]) lazily loads
//! a speech model once per process and reports load progress, and the
//! native-recognition provider ([`native::NativeRecognitionProvider`])
//! drives a host streaming-recognition capability while the file plays.
//! Callers pick one at construction time and never see the difference.

pub mod native;
pub mod pipeline;
#[cfg(feature = "whisper")]
pub mod whisper;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;

use crate::error::TranscribeError;
use crate::intake::AcceptedFile;

/// Turns an accepted audio file into a transcript.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Produce the final transcript for `file`, performing any one-time
    /// setup internally. Callers enforce at most one attempt in flight.
    async fn transcribe(&self, file: &AcceptedFile) -> Result<String, TranscribeError>;

    /// Observe one-time initialization progress, when the variant has
    /// an observable setup phase.
    fn progress_updates(&self) -> Option<watch::Receiver<InitProgress>> {
        None
    }
}

/// Snapshot of the one-time initialization, 0–100 percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InitProgress {
    pub percent: u8,
}

impl InitProgress {
    /// Cosmetic banding only; no other component depends on it.
    pub fn stage(&self) -> InitStage {
        match self.percent {
            0..=49 => InitStage::Downloading,
            50..=89 => InitStage::Installing,
            _ => InitStage::Finalizing,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.stage() {
            InitStage::Downloading => "Téléchargement...",
            InitStage::Installing => "Installation...",
            InitStage::Finalizing => "Finalisation...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitStage {
    Downloading,
    Installing,
    Finalizing,
}

/// Handed to a model pipeline during load. Updates are clamped so the
/// published percentage never decreases within one attempt.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    tx: watch::Sender<InitProgress>,
}

impl ProgressReporter {
    pub(crate) fn new(tx: watch::Sender<InitProgress>) -> Self {
        Self { tx }
    }

    pub(crate) fn reset(&self) {
        self.tx.send_replace(InitProgress::default());
    }

    pub fn report(&self, percent: u8) {
        let percent = percent.min(100);
        self.tx.send_if_modified(|current| {
            if percent > current.percent {
                current.percent = percent;
                true
            } else {
                false
            }
        });
    }
}
