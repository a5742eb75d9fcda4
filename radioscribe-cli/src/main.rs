use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use radioscribe::{ConfigFile, TranscribeOptions, TranscriptionClient};

const USAGE: &str = "Usage: radioscribe <file_path>";

#[derive(Parser)]
#[command(
    name = "radioscribe",
    version,
    about = "Transcribe a radio dispatch recording with the Whisper API"
)]
struct Cli {
    /// Audio file to transcribe.
    input: Option<PathBuf>,

    /// API key sent as a bearer token.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Transcription endpoint URL.
    #[arg(long, env = "RADIOSCRIBE_ENDPOINT")]
    endpoint: Option<String>,

    /// JSON config file (default: ~/.config/radioscribe/config.json).
    #[arg(long, env = "RADIOSCRIBE_CONFIG")]
    config: Option<PathBuf>,

    /// Model name.
    #[arg(long)]
    model: Option<String>,

    /// Prompt describing the audio.
    #[arg(long)]
    prompt: Option<String>,

    /// Language code (e.g. "en").
    #[arg(long)]
    language: Option<String>,

    /// Response format requested from the API.
    #[arg(long)]
    response_format: Option<String>,

    /// Sampling temperature (0 to 1).
    #[arg(long)]
    temperature: Option<f32>,

    /// Exit with an error when the API answers with a non-2xx status.
    #[arg(long)]
    fail_on_http_error: bool,

    /// Write output to file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let Some(input) = cli.input.clone() else {
        println!("{USAGE}");
        println!("Run with --help for all options");
        std::process::exit(1);
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("radioscribe=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = match build_options(&cli) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let client = match TranscriptionClient::new(opts) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .expect("valid template"),
    );
    spinner.set_message(format!(
        "Transcribing {}",
        input
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = client.transcribe(&input).await;
    spinner.finish_and_clear();

    let body = match result {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, radioscribe::Error::MissingApiKey) {
                eprintln!("Or pass the key with --api-key");
            }
            std::process::exit(1);
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, format!("{body}\n")) {
                eprintln!("Error writing to {}: {e}", path.display());
                std::process::exit(1);
            }
            eprintln!("Written to {}", path.display());
        }
        None => println!("{body}"),
    }
}

/// Defaults, then the config file, then env/flags.
fn build_options(cli: &Cli) -> radioscribe::Result<TranscribeOptions> {
    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::load_default()?,
    };

    let mut opts = TranscribeOptions::new().apply_config(&file)?;

    if let Some(key) = cli.api_key.as_deref().filter(|k| !k.is_empty()) {
        opts = opts.api_key(key);
    }
    if let Some(endpoint) = &cli.endpoint {
        opts = opts.endpoint(endpoint.clone())?;
    }
    if let Some(model) = &cli.model {
        opts = opts.model(model.clone());
    }
    if let Some(prompt) = &cli.prompt {
        opts = opts.prompt(prompt.clone());
    }
    if let Some(lang) = &cli.language {
        opts = opts.language(lang.clone());
    }
    if let Some(format) = &cli.response_format {
        opts = opts.response_format(format.clone());
    }
    if let Some(temp) = cli.temperature {
        opts = opts.temperature(temp)?;
    }
    if cli.fail_on_http_error {
        opts = opts.fail_on_http_error(true);
    }

    Ok(opts)
}
