//! Enrichment actions over a transcript.
//!
//! [`EnrichmentBackend`] is the seam where a real text-processing
//! backend plugs in: string in, string out, idempotent per invocation,
//! at most one action pending at a time (enforced by the session).
//! [`CannedBackend`] is the fixture implementation: fixed per-kind
//! payloads after a simulated latency, standing in until a real backend
//! exists.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::error::EnrichError;
use crate::record::ActionKind;

#[async_trait]
pub trait EnrichmentBackend: Send + Sync {
    /// Derive text for one action kind from the source transcript.
    async fn run(&self, kind: ActionKind, source_text: &str) -> Result<String, EnrichError>;
}

/// Fixture backend returning canned content after a fixed delay. Never
/// fails under normal conditions.
pub struct CannedBackend {
    latency: Duration,
}

impl CannedBackend {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_secs(2),
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for CannedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnrichmentBackend for CannedBackend {
    async fn run(&self, kind: ActionKind, source_text: &str) -> Result<String, EnrichError> {
        debug!(
            "simulated {kind} over {} source chars",
            source_text.chars().count()
        );
        tokio::time::sleep(self.latency).await;
        Ok(canned(kind).to_string())
    }
}

fn canned(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Clean => {
            "Bonjour et bienvenue dans ce podcast sur l'intelligence artificielle.\n\n\
             Aujourd'hui, nous allons parler des dernières avancées en matière de \
             reconnaissance vocale et de traitement du langage naturel. L'IA a \
             révolutionné notre façon de travailler, particulièrement dans le domaine \
             de la transcription automatique.\n\n\
             Pour la suite, nous prévoyons d'organiser une réunion la semaine prochaine \
             pour définir les prochaines étapes de notre projet. N'oubliez pas de \
             préparer vos présentations et de revoir le budget alloué.\n\n\
             Comme le disait Steve Jobs : \"L'innovation distingue un leader d'un \
             suiveur.\" Cette citation résume parfaitement l'esprit entrepreneurial qui \
             doit nous guider."
        }
        ActionKind::Summary => {
            "# Résumé du podcast\n\n\
             ## Sujet principal\n\
             Discussion sur les avancées de l'IA en reconnaissance vocale et traitement \
             du langage naturel.\n\n\
             ## Points clés\n\
             • Les modèles de transcription offrent une précision remarquable\n\
             • Importance des considérations éthiques et de la vie privée\n\
             • Planification d'une réunion pour définir les prochaines étapes\n\n\
             ## Actions prévues\n\
             • Organisation d'une réunion la semaine prochaine\n\
             • Préparation des présentations nécessaires\n\
             • Révision du budget alloué au projet"
        }
        ActionKind::Themes => {
            "Intelligence artificielle et technologie\n\
             Reconnaissance vocale automatique\n\
             Traitement du langage naturel\n\
             Éthique et vie privée en IA\n\
             Gestion de projet et planification\n\
             Innovation et entrepreneuriat"
        }
        ActionKind::Actions => {
            "Organiser une réunion la semaine prochaine\n\
             Préparer les présentations pour la réunion\n\
             Revoir et valider le budget alloué au projet\n\
             Définir les prochaines étapes du développement\n\
             Étudier les implications éthiques des technologies utilisées"
        }
        ActionKind::Quotes => {
            "\"L'innovation distingue un leader d'un suiveur\" - Steve Jobs\n\
             \"Il est crucial de maintenir la transparence et de respecter la vie \
             privée des utilisateurs\"\n\
             \"L'IA a révolutionné notre façon de travailler\""
        }
        ActionKind::Translate => {
            "Hello and welcome to this podcast about artificial intelligence.\n\n\
             Today we will talk about the latest advances in speech recognition and \
             natural language processing. AI has revolutionized the way we work, \
             particularly in the field of automatic transcription."
        }
    }
}
