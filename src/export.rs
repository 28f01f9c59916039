//! Export surface: copy-to-clipboard payloads and download-as-text
//! files for the transcript and each derived field.
//!
//! Filenames are fixed literals; list fields are flattened one item per
//! line.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::record::TranscriptionRecord;

/// A record field with an export affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Original,
    Processed,
    Summary,
    Themes,
    ActionItems,
    KeyQuotes,
    Translated,
}

impl RecordField {
    pub const ALL: [RecordField; 7] = [
        RecordField::Original,
        RecordField::Processed,
        RecordField::Summary,
        RecordField::Themes,
        RecordField::ActionItems,
        RecordField::KeyQuotes,
        RecordField::Translated,
    ];

    pub fn filename(&self) -> &'static str {
        match self {
            RecordField::Original => "transcription.txt",
            RecordField::Processed => "texte-propre.txt",
            RecordField::Summary => "resume.txt",
            RecordField::Themes => "themes.txt",
            RecordField::ActionItems => "actions.txt",
            RecordField::KeyQuotes => "citations.txt",
            RecordField::Translated => "traduction.txt",
        }
    }
}

/// The exact text a host clipboard would receive for one field; `None`
/// while the field is unpopulated.
pub fn field_text(record: &TranscriptionRecord, field: RecordField) -> Option<String> {
    match field {
        RecordField::Original => Some(record.original_text.clone()),
        RecordField::Processed => record.processed_text.clone(),
        RecordField::Summary => record.summary.clone(),
        RecordField::Themes => record.themes.as_ref().map(|l| l.join("\n")),
        RecordField::ActionItems => record.action_items.as_ref().map(|l| l.join("\n")),
        RecordField::KeyQuotes => record.key_quotes.as_ref().map(|l| l.join("\n")),
        RecordField::Translated => record.translated_text.clone(),
    }
}

/// One downloadable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub filename: &'static str,
    pub contents: String,
}

/// Every populated field of the record as a downloadable document, the
/// original transcript first.
pub fn exports(record: &TranscriptionRecord) -> Vec<Export> {
    RecordField::ALL
        .iter()
        .filter_map(|&field| {
            field_text(record, field).map(|contents| Export {
                filename: field.filename(),
                contents,
            })
        })
        .collect()
}

/// Write every populated field into `dir` as plain-text files and return
/// the written paths.
pub fn write_to_dir(record: &TranscriptionRecord, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for export in exports(record) {
        let path = dir.join(export.filename);
        let mut file = std::fs::File::create(&path)?;
        file.write_all(export.contents.as_bytes())?;
        info!("exported {}", path.display());
        written.push(path);
    }
    Ok(written)
}
