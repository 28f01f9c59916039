//! Session core for Secretary, an audio-transcription notepad: upload a
//! file, obtain a transcript, then apply smart text actions to it.
//!
//! The crate models the pipeline as an explicit state machine rather
//! than UI glue: [`intake`] validates the file, a
//! [`provider::TranscriptionProvider`] (model pipeline or native
//! recognition, chosen at construction) produces the transcript,
//! [`enrich::EnrichmentBackend`] derives text per action, and
//! [`session::Session`] holds the [`record::TranscriptionRecord`] and
//! publishes events for the presentation layer.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use secretary::enrich::CannedBackend;
//! use secretary::intake::FileMeta;
//! use secretary::record::ActionKind;
//! use secretary::session::Session;
//! # use secretary::provider::TranscriptionProvider;
//! # async fn demo(provider: Arc<dyn TranscriptionProvider>) -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new(provider, Arc::new(CannedBackend::new()));
//! let files = vec![FileMeta::for_path("meeting.wav".as_ref())?];
//! session.upload(&files).await?;
//! session.run_action(ActionKind::Themes).await?;
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod enrich;
pub mod error;
pub mod export;
pub mod intake;
pub mod notify;
pub mod provider;
pub mod record;
pub mod session;

pub use error::{EnrichError, IntakeError, PlaybackError, SessionError, TranscribeError};
pub use intake::{AcceptedFile, FileMeta, MAX_UPLOAD_BYTES};
pub use record::{ActionKind, TranscriptionRecord};
pub use session::{Session, SessionEvent};
