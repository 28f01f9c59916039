//! Command-line front end for the session core.
//!
//! Uploads one audio file (or a pasted transcript), runs the requested
//! smart actions, and streams session events to stdout as JSON lines so
//! a host UI can render them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use log::error;

use secretary::enrich::CannedBackend;
use secretary::intake::{AcceptedFile, FileMeta};
use secretary::provider::TranscriptionProvider;
use secretary::record::ActionKind;
use secretary::session::Session;
use secretary::TranscribeError;

#[derive(Parser, Debug)]
#[command(about = "Transcribe an audio file and apply smart text actions", version)]
struct Args {
    /// Audio file to transcribe (WAV, 16 kHz mono)
    #[arg(long, conflicts_with = "text")]
    audio: Option<PathBuf>,

    /// Skip transcription and seed the session with this transcript
    #[arg(long)]
    text: Option<String>,

    /// Actions to run against the transcript (clean, summary, themes,
    /// actions, quotes, translate)
    #[arg(long = "action", value_name = "KIND")]
    actions: Vec<ActionKind>,

    /// Directory to write the text exports into
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Simulated enrichment latency in milliseconds
    #[arg(long, default_value_t = 2000)]
    latency_ms: u64,

    /// Path to the GGML model file
    #[cfg(feature = "whisper")]
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Forced language code passed to the model (e.g. "fr")
    #[cfg(feature = "whisper")]
    #[arg(long)]
    language: Option<String>,
}

/// Provider used with `--text`: hands back a fixed transcript without
/// touching the file contents.
struct StaticProvider {
    transcript: String,
}

#[async_trait]
impl TranscriptionProvider for StaticProvider {
    async fn transcribe(&self, _file: &AcceptedFile) -> Result<String, TranscribeError> {
        if self.transcript.trim().is_empty() {
            return Err(TranscribeError::EmptyTranscript);
        }
        Ok(self.transcript.clone())
    }
}

fn build_provider(args: &Args) -> Result<Arc<dyn TranscriptionProvider>, String> {
    if let Some(text) = &args.text {
        return Ok(Arc::new(StaticProvider {
            transcript: text.clone(),
        }));
    }

    #[cfg(feature = "whisper")]
    {
        use secretary::provider::pipeline::PipelineProvider;
        use secretary::provider::whisper::WhisperPipeline;

        let model_path = args
            .model_path
            .clone()
            .ok_or("--model-path is required with --audio")?;
        let pipeline = WhisperPipeline::new(model_path, args.language.clone());
        Ok(Arc::new(PipelineProvider::new(Arc::new(pipeline))))
    }

    #[cfg(not(feature = "whisper"))]
    {
        Err("transcribing audio requires the `whisper` feature; use --text instead".to_string())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    env_logger::init();
    let args = Args::parse();

    let provider = match build_provider(&args) {
        Ok(provider) => provider,
        Err(message) => {
            error!("{message}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let backend = Arc::new(CannedBackend::with_latency(Duration::from_millis(
        args.latency_ms,
    )));
    let session = Session::new(provider, backend);

    let mut events = session.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let Ok(line) = serde_json::to_string(&event) {
                println!("{line}");
            }
        }
    });

    let exit = run(&session, &args).await;

    drop(session);
    let _ = printer.await;
    exit
}

async fn run(session: &Session, args: &Args) -> std::process::ExitCode {
    let files = match upload_batch(args) {
        Ok(files) => files,
        Err(message) => {
            error!("{message}");
            return std::process::ExitCode::FAILURE;
        }
    };

    if let Err(err) = session.upload(&files).await {
        error!("upload failed: {err}");
        return std::process::ExitCode::FAILURE;
    }

    for kind in &args.actions {
        if let Err(err) = session.run_action(*kind).await {
            error!("action {kind} failed: {err}");
        }
    }

    if let Some(dir) = &args.export_dir {
        let Some(record) = session.record() else {
            error!("nothing to export");
            return std::process::ExitCode::FAILURE;
        };
        if let Err(err) = std::fs::create_dir_all(dir)
            .and_then(|_| secretary::export::write_to_dir(&record, dir))
        {
            error!("export failed: {err}");
            return std::process::ExitCode::FAILURE;
        }
    }

    std::process::ExitCode::SUCCESS
}

fn upload_batch(args: &Args) -> Result<Vec<FileMeta>, String> {
    if let Some(path) = &args.audio {
        let meta = FileMeta::for_path(path).map_err(|e| format!("{}: {e}", path.display()))?;
        return Ok(vec![meta]);
    }
    // --text mode still goes through intake with a synthetic entry.
    Ok(vec![FileMeta {
        name: "session.wav".to_string(),
        mime: "audio/wav".to_string(),
        size: 0,
        path: None,
    }])
}
