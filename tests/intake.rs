use secretary::intake::{first_audio_file, validate, FileMeta, MAX_UPLOAD_BYTES};
use secretary::IntakeError;

fn file(name: &str, mime: &str, size: u64) -> FileMeta {
    FileMeta {
        name: name.to_string(),
        mime: mime.to_string(),
        size,
        path: None,
    }
}

#[test]
fn accepts_audio_mime_with_unknown_extension() {
    let meta = file("capture.bin", "audio/webm", 1024);
    assert!(validate(&meta).is_ok());
}

#[test]
fn accepts_known_extension_without_mime() {
    for name in [
        "a.mp3", "b.wav", "c.m4a", "d.ogg", "e.flac", "f.aac", "g.wma", "LOUD.MP3",
    ] {
        let meta = file(name, "", 1024);
        assert!(validate(&meta).is_ok(), "{name} should be accepted");
    }
}

#[test]
fn rejects_non_audio_file() {
    let meta = file("notes.pdf", "application/pdf", 1024);
    assert_eq!(
        validate(&meta),
        Err(IntakeError::UnsupportedFormat("notes.pdf".to_string()))
    );
}

#[test]
fn rejects_extension_embedded_mid_name() {
    let meta = file("song.mp3.exe", "application/octet-stream", 1024);
    assert!(matches!(
        validate(&meta),
        Err(IntakeError::UnsupportedFormat(_))
    ));
}

#[test]
fn size_ceiling_is_exact() {
    let at_limit = file("big.wav", "audio/wav", MAX_UPLOAD_BYTES);
    assert!(validate(&at_limit).is_ok());

    let over = file("big.wav", "audio/wav", MAX_UPLOAD_BYTES + 1);
    assert_eq!(
        validate(&over),
        Err(IntakeError::TooLarge {
            size: MAX_UPLOAD_BYTES + 1,
            max: MAX_UPLOAD_BYTES,
        })
    );
}

#[test]
fn oversized_file_rejected_even_with_valid_format() {
    // 150 MB .wav upload scenario.
    let meta = file("meeting.wav", "audio/wav", 150 * 1024 * 1024);
    assert!(matches!(validate(&meta), Err(IntakeError::TooLarge { .. })));
}

#[test]
fn first_audio_file_skips_non_audio_entries() {
    let files = vec![
        file("slides.pdf", "application/pdf", 10),
        file("meeting.mp3", "audio/mpeg", 10),
        file("other.wav", "audio/wav", 10),
    ];
    let picked = first_audio_file(&files).expect("an audio file is present");
    assert_eq!(picked.name, "meeting.mp3");
}

#[test]
fn first_audio_file_empty_when_nothing_matches() {
    let files = vec![file("slides.pdf", "application/pdf", 10)];
    assert!(first_audio_file(&files).is_none());
    assert!(first_audio_file(&[]).is_none());
}
