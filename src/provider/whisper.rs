//! Whisper-backed model pipeline (feature `whisper`).
//!
//! Concrete [`ModelPipeline`] over `whisper-rs` for running the pipeline
//! provider against a local GGML model file. Loading a model from disk
//! has no byte-level download progress, so the reporter only sees the
//! coarse load stages.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::debug;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::error::TranscribeError;

use super::pipeline::{ModelPipeline, SpeechModel};
use super::ProgressReporter;

pub struct WhisperPipeline {
    model_path: PathBuf,
    model_id: String,
    language: Option<String>,
}

impl WhisperPipeline {
    pub fn new(model_path: PathBuf, language: Option<String>) -> Self {
        let model_id = model_path.to_string_lossy().into_owned();
        Self {
            model_path,
            model_id,
            language,
        }
    }
}

#[async_trait]
impl ModelPipeline for WhisperPipeline {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn load(
        &self,
        progress: &ProgressReporter,
    ) -> Result<Arc<dyn SpeechModel>, TranscribeError> {
        progress.report(10);
        let path = self
            .model_path
            .to_str()
            .ok_or_else(|| TranscribeError::InitializationFailed(self.model_id.clone()))?;

        let context = WhisperContext::new_with_params(path, WhisperContextParameters::default())
            .map_err(|e| TranscribeError::InitializationFailed(e.to_string()))?;
        progress.report(80);

        let state = context
            .create_state()
            .map_err(|e| TranscribeError::InitializationFailed(e.to_string()))?;
        progress.report(95);

        Ok(Arc::new(LoadedWhisper {
            _context: context,
            state: Arc::new(Mutex::new(state)),
            language: self.language.clone(),
        }))
    }
}

struct LoadedWhisper {
    _context: WhisperContext,
    state: Arc<Mutex<whisper_rs::WhisperState>>,
    language: Option<String>,
}

#[async_trait]
impl SpeechModel for LoadedWhisper {
    async fn infer(&self, samples: &[f32]) -> Result<String, TranscribeError> {
        let state = Arc::clone(&self.state);
        let language = self.language.clone();
        let samples = samples.to_vec();

        // Inference is CPU-bound and can run for a long time; keep it off
        // the async executor.
        tokio::task::spawn_blocking(move || -> Result<String, TranscribeError> {
            let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

            let mut params = FullParams::new(SamplingStrategy::BeamSearch {
                beam_size: 3,
                patience: -1.0,
            });
            params.set_language(language.as_deref());
            params.set_print_special(false);
            params.set_print_progress(false);
            params.set_print_realtime(false);
            params.set_print_timestamps(false);
            params.set_suppress_blank(true);

            state
                .full(params, &samples)
                .map_err(|e| TranscribeError::Engine(e.to_string()))?;

            let segments = state
                .full_n_segments()
                .map_err(|e| TranscribeError::Engine(e.to_string()))?;
            debug!("whisper produced {segments} segments");

            let mut text = String::new();
            for i in 0..segments {
                let segment = state
                    .full_get_segment_text(i)
                    .map_err(|e| TranscribeError::Engine(e.to_string()))?;
                text.push_str(&segment);
            }
            Ok(text)
        })
        .await
        .map_err(|e| TranscribeError::Engine(e.to_string()))?
    }
}
