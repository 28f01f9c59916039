//! Error taxonomy for the session pipeline.
//!
//! Display strings are the human-readable causes surfaced in user-facing
//! notifications, so they are written in the application language (French).
//! Log lines stay in English.

use thiserror::Error;

/// Rejections produced by file intake. Terminal for the upload attempt;
/// transcription is never reached.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// The selection contained no file with an audio MIME type or a known
    /// audio extension.
    #[error("format non supporté: {0}")]
    UnsupportedFormat(String),

    /// The file exceeds the upload ceiling.
    #[error("fichier trop volumineux: {size} octets (maximum {max})")]
    TooLarge { size: u64, max: u64 },
}

/// Failure at the audio-resource boundary (decoding or playing the
/// uploaded file).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("lecture du fichier audio impossible: {0}")]
pub struct PlaybackError(pub String);

/// Failures raised by a transcription provider, either variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranscribeError {
    /// The one-time model/capability setup could not complete.
    #[error("impossible d'initialiser le modèle de transcription: {0}")]
    InitializationFailed(String),

    /// The engine ran but produced no usable text.
    #[error("aucun texte transcrit trouvé")]
    EmptyTranscript,

    /// The host refused access to the recognition capability.
    #[error("l'accès à la reconnaissance vocale a été refusé")]
    PermissionDenied,

    /// The recognition capability does not exist in this host at all.
    #[error("la reconnaissance vocale n'est pas disponible dans cet environnement")]
    UnsupportedEnvironment,

    /// The engine itself failed mid-inference.
    #[error("erreur du moteur de transcription: {0}")]
    Engine(String),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// Failures raised by an enrichment backend. Aborts only the one action;
/// prior record fields stay intact.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnrichError {
    #[error("le traitement du texte a échoué: {0}")]
    ProcessingFailed(String),
}

/// Errors surfaced by [`crate::session::Session`] operations, including
/// the re-entry rejections for the one-task-at-a-time rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Transcribe(#[from] TranscribeError),

    #[error(transparent)]
    Enrich(#[from] EnrichError),

    /// A transcription is already pending; the trigger is disabled.
    #[error("une transcription est déjà en cours")]
    TranscriptionPending,

    /// An enrichment action is already pending; all triggers are disabled.
    #[error("une action est déjà en cours")]
    ActionPending,

    /// An action was requested before any transcript exists.
    #[error("aucune transcription disponible")]
    NoTranscript,
}
