//! File intake: validates an uploaded file against the audio allow-list
//! and the size ceiling before anything downstream runs.
//!
//! Intake looks only at metadata (name, MIME type, byte size); it never
//! opens the file.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::error::IntakeError;

/// Upload ceiling: 100 MiB exactly.
pub const MAX_UPLOAD_BYTES: u64 = 104_857_600;

static AUDIO_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(mp3|wav|m4a|ogg|flac|aac|wma)$").expect("audio extension pattern")
});

/// Metadata for a file offered through the upload surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    /// MIME type as reported by the host; may be empty.
    pub mime: String,
    pub size: u64,
    /// Where the bytes live, for providers that read or play the file.
    /// Intake itself never opens it.
    pub path: Option<PathBuf>,
}

impl FileMeta {
    /// Build metadata for a file on disk. Reads directory metadata only,
    /// never the contents.
    pub fn for_path(path: &Path) -> std::io::Result<Self> {
        let size = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            mime: guess_mime(&name),
            name,
            size,
            path: Some(path.to_path_buf()),
        })
    }

    fn looks_like_audio(&self) -> bool {
        self.mime.starts_with("audio/") || AUDIO_EXTENSION.is_match(&self.name)
    }
}

fn guess_mime(name: &str) -> String {
    let ext = name.rsplit('.').next().unwrap_or_default().to_lowercase();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "wma" => "audio/x-ms-wma",
        _ => "",
    }
    .to_string()
}

/// A file that passed intake validation. Proof of acceptance for the
/// transcription provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile(FileMeta);

impl AcceptedFile {
    pub fn meta(&self) -> &FileMeta {
        &self.0
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.0.path.as_deref()
    }
}

/// Select the first audio-looking file from a dropped/selected batch.
/// Non-audio entries are silently ignored.
pub fn first_audio_file(files: &[FileMeta]) -> Option<&FileMeta> {
    files.iter().find(|f| f.looks_like_audio())
}

/// Validate a single file: audio format check, then the size ceiling.
pub fn validate(file: &FileMeta) -> Result<AcceptedFile, IntakeError> {
    if !file.looks_like_audio() {
        debug!("intake rejected {:?}: not an audio file", file.name);
        return Err(IntakeError::UnsupportedFormat(file.name.clone()));
    }

    if file.size > MAX_UPLOAD_BYTES {
        debug!("intake rejected {:?}: {} bytes", file.name, file.size);
        return Err(IntakeError::TooLarge {
            size: file.size,
            max: MAX_UPLOAD_BYTES,
        });
    }

    Ok(AcceptedFile(file.clone()))
}
