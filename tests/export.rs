use secretary::export::{exports, field_text, write_to_dir, RecordField};
use secretary::record::{ActionKind, TranscriptionRecord};

fn full_record() -> TranscriptionRecord {
    TranscriptionRecord::new("Bonjour tout le monde")
        .unwrap()
        .apply(ActionKind::Clean, "Texte propre.")
        .apply(ActionKind::Summary, "# Résumé")
        .apply(ActionKind::Themes, "IA\nÉthique")
        .apply(ActionKind::Actions, "Organiser la réunion")
        .apply(ActionKind::Quotes, "\"Citation\"")
        .apply(ActionKind::Translate, "Hello everyone")
}

#[test]
fn filenames_are_fixed_literals() {
    assert_eq!(RecordField::Original.filename(), "transcription.txt");
    assert_eq!(RecordField::Processed.filename(), "texte-propre.txt");
    assert_eq!(RecordField::Summary.filename(), "resume.txt");
    assert_eq!(RecordField::Themes.filename(), "themes.txt");
    assert_eq!(RecordField::ActionItems.filename(), "actions.txt");
    assert_eq!(RecordField::KeyQuotes.filename(), "citations.txt");
    assert_eq!(RecordField::Translated.filename(), "traduction.txt");
}

#[test]
fn unpopulated_fields_have_no_payload() {
    let record = TranscriptionRecord::new("seulement le transcript").unwrap();

    assert_eq!(
        field_text(&record, RecordField::Original).as_deref(),
        Some("seulement le transcript")
    );
    for field in [
        RecordField::Processed,
        RecordField::Summary,
        RecordField::Themes,
        RecordField::ActionItems,
        RecordField::KeyQuotes,
        RecordField::Translated,
    ] {
        assert_eq!(field_text(&record, field), None);
    }

    let exports = exports(&record);
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].filename, "transcription.txt");
}

#[test]
fn list_fields_flatten_one_item_per_line() {
    let record = full_record();
    assert_eq!(
        field_text(&record, RecordField::Themes).as_deref(),
        Some("IA\nÉthique")
    );
}

#[test]
fn exports_original_first() {
    let exports = exports(&full_record());
    assert_eq!(exports.len(), 7);
    assert_eq!(exports[0].filename, "transcription.txt");
    assert_eq!(exports[0].contents, "Bonjour tout le monde");
}

#[test]
fn writes_populated_fields_as_text_files() {
    let dir = tempfile::tempdir().unwrap();
    let record = TranscriptionRecord::new("Bonjour")
        .unwrap()
        .apply(ActionKind::Clean, "Texte propre.");

    let written = write_to_dir(&record, dir.path()).unwrap();
    assert_eq!(written.len(), 2);

    let transcript = std::fs::read_to_string(dir.path().join("transcription.txt")).unwrap();
    assert_eq!(transcript, "Bonjour");
    let cleaned = std::fs::read_to_string(dir.path().join("texte-propre.txt")).unwrap();
    assert_eq!(cleaned, "Texte propre.");
    assert!(!dir.path().join("resume.txt").exists());
}
