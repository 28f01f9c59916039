use std::time::Duration;

use secretary::enrich::{CannedBackend, EnrichmentBackend};
use secretary::record::{split_lines, ActionKind, TranscriptionRecord};

#[tokio::test(start_paused = true)]
async fn every_action_kind_has_a_payload() {
    let backend = CannedBackend::new();
    for kind in ActionKind::ALL {
        let derived = backend.run(kind, "source").await.unwrap();
        assert!(!derived.trim().is_empty(), "{kind} payload should not be blank");
    }
}

#[tokio::test(start_paused = true)]
async fn list_payloads_split_into_multiple_items() {
    let backend = CannedBackend::with_latency(Duration::ZERO);
    for kind in [ActionKind::Themes, ActionKind::Actions, ActionKind::Quotes] {
        let derived = backend.run(kind, "source").await.unwrap();
        let items = split_lines(&derived);
        assert!(items.len() > 1, "{kind} should produce several items");

        let record = TranscriptionRecord::new("source").unwrap().apply(kind, &derived);
        match kind {
            ActionKind::Themes => assert_eq!(record.themes, Some(items)),
            ActionKind::Actions => assert_eq!(record.action_items, Some(items)),
            ActionKind::Quotes => assert_eq!(record.key_quotes, Some(items)),
            _ => unreachable!(),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn repeated_invocations_are_idempotent() {
    let backend = CannedBackend::with_latency(Duration::ZERO);
    let first = backend.run(ActionKind::Summary, "source").await.unwrap();
    let second = backend.run(ActionKind::Summary, "autre source").await.unwrap();
    assert_eq!(first, second);
}
