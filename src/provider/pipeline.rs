//! Model-pipeline transcription variant.
//!
//! Wraps an opaque model-loading pipeline (the `pipeline(task, model_id,
//! progress_callback)` boundary) behind the provider contract. The
//! loaded model is an explicitly owned, lazily constructed singleton:
//! initialization runs once per provider lifetime and concurrent callers
//! attach to the same in-flight load instead of starting a second one.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::{watch, OnceCell};

use crate::audio;
use crate::error::{PlaybackError, TranscribeError};
use crate::intake::AcceptedFile;

use super::{InitProgress, ProgressReporter, TranscriptionProvider};

/// The inference function returned by a loaded pipeline: raw samples in,
/// text out.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    async fn infer(&self, samples: &[f32]) -> Result<String, TranscribeError>;
}

/// The opaque model-loading boundary. Implementations download or load
/// whatever they need, reporting coarse progress as they go.
#[async_trait]
pub trait ModelPipeline: Send + Sync {
    /// Identifier used for logging only.
    fn model_id(&self) -> &str;

    /// Perform the one-time setup and hand back the inference function.
    async fn load(&self, progress: &ProgressReporter)
        -> Result<Arc<dyn SpeechModel>, TranscribeError>;
}

pub struct PipelineProvider {
    pipeline: Arc<dyn ModelPipeline>,
    model: OnceCell<Arc<dyn SpeechModel>>,
    progress_tx: watch::Sender<InitProgress>,
}

impl PipelineProvider {
    pub fn new(pipeline: Arc<dyn ModelPipeline>) -> Self {
        let (progress_tx, _) = watch::channel(InitProgress::default());
        Self {
            pipeline,
            model: OnceCell::new(),
            progress_tx,
        }
    }

    /// Load the model if this is the first call; otherwise reuse the
    /// loaded model or await the load already in flight.
    pub async fn ensure_ready(&self) -> Result<Arc<dyn SpeechModel>, TranscribeError> {
        let model = self
            .model
            .get_or_try_init(|| async {
                info!("initializing speech model {}", self.pipeline.model_id());
                let reporter = ProgressReporter::new(self.progress_tx.clone());
                // Each attempt restarts from zero; the monotonic clamp
                // applies within a single attempt only.
                reporter.reset();
                let model = self.pipeline.load(&reporter).await?;
                reporter.report(100);
                info!("speech model {} ready", self.pipeline.model_id());
                Ok::<_, TranscribeError>(model)
            })
            .await?;
        Ok(Arc::clone(model))
    }
}

#[async_trait]
impl TranscriptionProvider for PipelineProvider {
    async fn transcribe(&self, file: &AcceptedFile) -> Result<String, TranscribeError> {
        let model = self.ensure_ready().await?;

        let path = file
            .path()
            .ok_or_else(|| PlaybackError(format!("{}: emplacement inconnu", file.name())))?;
        let samples = audio::read_wav_samples(path)?;
        debug!("transcribing {} ({} samples)", file.name(), samples.len());

        let text = model.infer(&samples).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(TranscribeError::EmptyTranscript);
        }
        Ok(text.to_string())
    }

    fn progress_updates(&self) -> Option<watch::Receiver<InitProgress>> {
        Some(self.progress_tx.subscribe())
    }
}
