//! Native streaming-recognition transcription variant.
//!
//! Backed by a host-provided recognition capability instead of a local
//! model: the uploaded file is played while the recognizer listens, and
//! only finalized (non-interim) segments are kept, joined in arrival
//! order. The recognizer is stopped a short grace delay after playback
//! ends so trailing finalized segments are still flushed.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};

use crate::error::{PlaybackError, TranscribeError};
use crate::intake::AcceptedFile;

use super::TranscriptionProvider;

/// Recognizer settings mirrored from the host capability surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerConfig {
    pub language: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            language: "fr-FR".to_string(),
            continuous: true,
            interim_results: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Provisional text; discarded by the provider.
    Interim(String),
    /// Finalized segment; accumulated in arrival order.
    Final(String),
}

/// Host-provided streaming recognition capability.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the capability exists in this host at all.
    fn is_available(&self) -> bool;

    /// Start a recognition run. Fails with
    /// [`TranscribeError::PermissionDenied`] when the host refuses.
    async fn start(&self, config: &RecognizerConfig) -> Result<RecognitionStream, TranscribeError>;
}

/// Event stream for one recognition run, with a stop signal back to the
/// capability.
pub struct RecognitionStream {
    events: mpsc::UnboundedReceiver<RecognitionEvent>,
    stop: Option<oneshot::Sender<()>>,
}

/// Capability-side handle paired with a [`RecognitionStream`].
pub struct RecognitionDriver {
    pub events: mpsc::UnboundedSender<RecognitionEvent>,
    pub stopped: oneshot::Receiver<()>,
}

impl RecognitionStream {
    pub fn channel() -> (RecognitionDriver, Self) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        (
            RecognitionDriver {
                events: events_tx,
                stopped: stop_rx,
            },
            Self {
                events: events_rx,
                stop: Some(stop_tx),
            },
        )
    }

    pub async fn next_event(&mut self) -> Option<RecognitionEvent> {
        self.events.recv().await
    }

    /// Non-blocking drain of segments already queued.
    pub fn try_next(&mut self) -> Option<RecognitionEvent> {
        self.events.try_recv().ok()
    }

    /// Ask the capability to stop. Queued events stay readable.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

/// Transient playable reference for the uploaded file. The underlying
/// resource is released when the guard drops, on every exit path.
pub struct PlaybackGuard {
    finished: Option<oneshot::Receiver<()>>,
    released: Option<oneshot::Sender<()>>,
}

/// Player-side handle paired with a [`PlaybackGuard`].
pub struct PlaybackControl {
    pub finished: oneshot::Sender<()>,
    pub released: oneshot::Receiver<()>,
}

impl PlaybackGuard {
    pub fn channel() -> (PlaybackControl, Self) {
        let (finished_tx, finished_rx) = oneshot::channel();
        let (released_tx, released_rx) = oneshot::channel();
        (
            PlaybackControl {
                finished: finished_tx,
                released: released_rx,
            },
            Self {
                finished: Some(finished_rx),
                released: Some(released_tx),
            },
        )
    }

    /// Resolves when playback ends (or the player goes away).
    pub async fn finished(&mut self) {
        if let Some(rx) = self.finished.as_mut() {
            let _ = rx.await;
            self.finished = None;
        }
    }
}

impl Drop for PlaybackGuard {
    fn drop(&mut self) {
        if let Some(released) = self.released.take() {
            let _ = released.send(());
        }
    }
}

/// Plays the uploaded file for the duration of a recognition run.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, file: &AcceptedFile) -> Result<PlaybackGuard, PlaybackError>;
}

pub struct NativeRecognitionProvider<R, P> {
    recognizer: R,
    player: P,
    config: RecognizerConfig,
    grace: Duration,
}

impl<R, P> NativeRecognitionProvider<R, P> {
    pub fn new(recognizer: R, player: P) -> Self {
        Self {
            recognizer,
            player,
            config: RecognizerConfig::default(),
            grace: Duration::from_secs(1),
        }
    }

    pub fn with_config(mut self, config: RecognizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the post-playback grace delay (shortened in tests).
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }
}

#[async_trait]
impl<R, P> TranscriptionProvider for NativeRecognitionProvider<R, P>
where
    R: SpeechRecognizer,
    P: AudioPlayer,
{
    async fn transcribe(&self, file: &AcceptedFile) -> Result<String, TranscribeError> {
        if !self.recognizer.is_available() {
            return Err(TranscribeError::UnsupportedEnvironment);
        }

        let mut stream = self.recognizer.start(&self.config).await?;
        let mut playback = self.player.play(file).await?;
        debug!("recognition started for {}", file.name());

        let mut finals: Vec<String> = Vec::new();
        let mut push_final = |text: String| {
            let text = text.trim().to_string();
            if !text.is_empty() {
                finals.push(text);
            }
        };

        // Accumulate while the file plays.
        loop {
            tokio::select! {
                _ = playback.finished() => break,
                event = stream.next_event() => match event {
                    Some(RecognitionEvent::Final(text)) => push_final(text),
                    Some(RecognitionEvent::Interim(_)) => {}
                    None => {
                        warn!("recognition ended before playback finished");
                        break;
                    }
                }
            }
        }

        // Grace window for trailing finalized segments, then stop.
        let flush = async {
            while let Some(event) = stream.next_event().await {
                if let RecognitionEvent::Final(text) = event {
                    push_final(text);
                }
            }
        };
        let _ = tokio::time::timeout(self.grace, flush).await;
        stream.stop();
        while let Some(event) = stream.try_next() {
            if let RecognitionEvent::Final(text) = event {
                push_final(text);
            }
        }
        drop(playback);

        if finals.is_empty() {
            return Err(TranscribeError::EmptyTranscript);
        }
        Ok(finals.join(" "))
    }
}
