//! Narrated vertical-short rendering worker binary.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_models::{PublishResult, RenderRequest};
use reel_storage::publisher_from_env;
use reel_tts::{SpeechSynthesizer, VoiceProfile};
use reel_worker::{Pipeline, PipelineError, WorkerConfig};

/// Render one narrated vertical short from a JSON payload.
#[derive(Parser, Debug)]
#[command(name = "reel-worker")]
struct Args {
    /// JSON payload with script, title, timestamp and video reference
    #[arg(long)]
    payload: String,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("reel=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting reel-worker");

    let args = Args::parse();

    // Malformed input fails before any external call
    let request = match RenderRequest::from_json(&args.payload) {
        Ok(r) => r,
        Err(e) => {
            report_failure(&PipelineError::malformed_input(e.to_string()));
            std::process::exit(1);
        }
    };

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let publisher = match publisher_from_env(config.destination).await {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "Failed to configure publisher");
            std::process::exit(1);
        }
    };

    let synthesizer = SpeechSynthesizer::new(VoiceProfile::from_env());
    let pipeline = Pipeline::new(config, synthesizer, publisher);

    match pipeline.run(&request).await {
        Ok(result) => {
            info!(
                file_id = %result.id,
                filename = %result.name,
                link = result.url.as_deref().unwrap_or("(none)"),
                "Render published"
            );
            if let Err(e) = write_github_output(&result).await {
                error!(error = %e, "Failed to write step outputs");
            }
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    }
}

/// Report the single terminal error with its stage and any tool
/// diagnostics.
fn report_failure(e: &PipelineError) {
    error!(
        stage = e.stage().map(|s| s.as_str()).unwrap_or("input"),
        error = %e,
        "Pipeline failed"
    );
    if let Some(diagnostic) = e.diagnostic() {
        error!("Encoder diagnostics:\n{}", diagnostic);
    }
}

/// Append step outputs for CI when `GITHUB_OUTPUT` is set.
async fn write_github_output(result: &PublishResult) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let Ok(path) = std::env::var("GITHUB_OUTPUT") else {
        return Ok(());
    };

    let mut file = tokio::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .await?;
    file.write_all(
        format!(
            "file_id={}\nfilename={}\nweb_link={}\n",
            result.id,
            result.name,
            result.url.as_deref().unwrap_or_default()
        )
        .as_bytes(),
    )
    .await?;
    file.flush().await
}
