//! Radio dispatch transcription client — audio file in, Whisper API transcript out.
//!
//! **radioscribe** uploads a local recording (typically a scanner capture of
//! police, fire or EMS traffic) to an OpenAI-compatible
//! `/v1/audio/transcriptions` endpoint as a multipart form and hands back the
//! response body untouched.
//!
//! # Quick start
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> radioscribe::Result<()> {
//! // API key from OPENAI_API_KEY, dispatch defaults for everything else
//! let json = radioscribe::transcribe_file("call.mp3").await?;
//! println!("{json}");
//! # Ok(())
//! # }
//! ```
//!
//! Use [`TranscribeOptions`] and [`TranscriptionClient`] to change the
//! endpoint, model, prompt or language.

pub mod client;
pub mod config;
pub mod error;
pub mod form;

pub use client::TranscriptionClient;
pub use config::{ConfigFile, TranscribeOptions};
pub use error::{Error, Result};

use std::path::Path;

/// Transcribe a local audio file with default options and the API key from
/// `OPENAI_API_KEY`.
pub async fn transcribe_file(path: impl AsRef<Path>) -> Result<String> {
    transcribe_file_with_options(path, TranscribeOptions::from_env()).await
}

/// Transcribe a local audio file with custom options.
pub async fn transcribe_file_with_options(
    path: impl AsRef<Path>,
    options: TranscribeOptions,
) -> Result<String> {
    let client = TranscriptionClient::new(options)?;
    client.transcribe(path).await
}
