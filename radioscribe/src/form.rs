use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::config::TranscribeOptions;
use crate::error::{Error, Result};

/// Field names in the order they are written to the form.
pub const FIELD_NAMES: [&str; 6] = [
    "file",
    "model",
    "prompt",
    "response_format",
    "temperature",
    "language",
];

/// Read an audio file and wrap it in the six-part transcription form.
///
/// The file part comes first and carries the raw bytes untouched, named after
/// the file's basename. The remaining parts are the text fields from `options`.
pub async fn build_form(path: &Path, options: &TranscribeOptions) -> Result<Form> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::AudioNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "read audio file");

    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".into());
    let mime = guess_mime(path);
    debug!(%file_name, mime, "building multipart form");

    let file_part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| Error::InvalidOption(format!("invalid content type {mime}: {e}")))?;

    Ok(text_fields(options)
        .into_iter()
        .fold(Form::new().part("file", file_part), |form, (name, value)| {
            form.text(name, value)
        }))
}

/// The five text fields, in wire order.
pub fn text_fields(options: &TranscribeOptions) -> [(&'static str, String); 5] {
    [
        ("model", options.model.clone()),
        ("prompt", options.prompt.clone()),
        ("response_format", options.response_format.clone()),
        ("temperature", options.temperature_field()),
        ("language", options.language.clone()),
    ]
}

/// Content type for the file part, from the extension. Covers the formats the
/// transcription API accepts.
fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp3" | "mpga" | "mpeg" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "mp4" => "video/mp4",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}
