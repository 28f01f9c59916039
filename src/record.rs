//! The session record and the reducer that folds enrichment results
//! into it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of smart actions that can be applied to a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Clean,
    Summary,
    Themes,
    Actions,
    Quotes,
    Translate,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Clean,
        ActionKind::Summary,
        ActionKind::Themes,
        ActionKind::Actions,
        ActionKind::Quotes,
        ActionKind::Translate,
    ];

    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Clean => "clean",
            ActionKind::Summary => "summary",
            ActionKind::Themes => "themes",
            ActionKind::Actions => "actions",
            ActionKind::Quotes => "quotes",
            ActionKind::Translate => "translate",
        }
    }

    /// User-facing label for the action palette and notifications.
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Clean => "Mettre au propre",
            ActionKind::Summary => "Résumé",
            ActionKind::Themes => "Analyse thématique",
            ActionKind::Actions => "Actions à faire",
            ActionKind::Quotes => "Citations clés",
            ActionKind::Translate => "Traduire",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an action kind the palette does not know.
/// Callers treat unknown kinds as a no-op rather than an abort.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("action inconnue: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Aggregate result for one uploaded file: the transcript plus every
/// derived field produced so far.
///
/// `original_text` is set once at creation and never mutated afterwards;
/// each action kind owns exactly one of the optional fields and later
/// invocations replace, never append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptionRecord {
    pub original_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_quotes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
}

impl TranscriptionRecord {
    /// Seed a record from a raw transcript. Surrounding whitespace is
    /// trimmed; a transcript that is blank after trimming yields `None`.
    pub fn new(transcript: &str) -> Option<Self> {
        let trimmed = transcript.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            original_text: trimmed.to_string(),
            processed_text: None,
            summary: None,
            themes: None,
            action_items: None,
            key_quotes: None,
            translated_text: None,
        })
    }

    /// Fold one enrichment result into the record. Pure with respect to
    /// every field other than the one owned by `kind`.
    #[must_use]
    pub fn apply(mut self, kind: ActionKind, derived: &str) -> Self {
        match kind {
            ActionKind::Clean => self.processed_text = Some(derived.to_string()),
            ActionKind::Summary => self.summary = Some(derived.to_string()),
            ActionKind::Themes => self.themes = Some(split_lines(derived)),
            ActionKind::Actions => self.action_items = Some(split_lines(derived)),
            ActionKind::Quotes => self.key_quotes = Some(split_lines(derived)),
            ActionKind::Translate => self.translated_text = Some(derived.to_string()),
        }
        self
    }
}

/// Derivation rule for list fields: split on line breaks, drop blank
/// lines, keep arrival order.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
