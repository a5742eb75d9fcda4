use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// OpenAI audio transcription endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";

pub const DEFAULT_MODEL: &str = "whisper-1";

/// Prompt tuned for scanner recordings of dispatch traffic.
pub const DEFAULT_PROMPT: &str = "Transcribe the radio dispatch audio. The speaker is usually a dispatcher, police officer, or EMS responder. There are often callsigns, ten-codes, and addresses said.";

pub const DEFAULT_RESPONSE_FORMAT: &str = "json";

pub const DEFAULT_LANGUAGE: &str = "en";

/// Environment variable holding the bearer token.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Options for a transcription request.
///
/// Defaults match the fixed dispatch setup: `whisper-1`, English, temperature 0,
/// JSON response and the dispatch prompt. The API key has no default and must be
/// supplied, either directly, from a [`ConfigFile`], or via [`API_KEY_ENV`].
#[derive(Debug)]
pub struct TranscribeOptions {
    pub endpoint: String,
    pub api_key: Option<SecretString>,
    pub model: String,
    pub prompt: String,
    pub response_format: String,
    pub temperature: f32,
    pub language: String,
    /// Turn non-2xx responses into [`Error::Api`] instead of returning the body.
    pub fail_on_http_error: bool,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: None,
            model: DEFAULT_MODEL.into(),
            prompt: DEFAULT_PROMPT.into(),
            response_format: DEFAULT_RESPONSE_FORMAT.into(),
            temperature: 0.0,
            language: DEFAULT_LANGUAGE.into(),
            fail_on_http_error: false,
        }
    }
}

impl TranscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with the API key taken from `OPENAI_API_KEY`, if set.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()) {
            opts.api_key = Some(SecretString::from(key));
        }
        opts
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(Error::InvalidOption("endpoint must not be empty".into()));
        }
        self.endpoint = endpoint;
        Ok(self)
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = format.into();
        self
    }

    /// Set the sampling temperature. Must be within `0.0..=1.0`.
    pub fn temperature(mut self, temp: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&temp) {
            return Err(Error::InvalidOption(format!(
                "temperature must be between 0 and 1, got {temp}"
            )));
        }
        self.temperature = temp;
        Ok(self)
    }

    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.language = lang.into();
        self
    }

    pub fn fail_on_http_error(mut self, enabled: bool) -> Self {
        self.fail_on_http_error = enabled;
        self
    }

    /// Overlay every value present in a config file.
    pub fn apply_config(mut self, file: &ConfigFile) -> Result<Self> {
        if let Some(endpoint) = &file.endpoint {
            self = self.endpoint(endpoint.clone())?;
        }
        if let Some(key) = file.api_key.as_ref().filter(|k| !k.is_empty()) {
            self = self.api_key(key.clone());
        }
        if let Some(model) = &file.model {
            self.model = model.clone();
        }
        if let Some(prompt) = &file.prompt {
            self.prompt = prompt.clone();
        }
        if let Some(format) = &file.response_format {
            self.response_format = format.clone();
        }
        if let Some(temp) = file.temperature {
            self = self.temperature(temp)?;
        }
        if let Some(lang) = &file.language {
            self.language = lang.clone();
        }
        if let Some(strict) = file.fail_on_http_error {
            self.fail_on_http_error = strict;
        }
        Ok(self)
    }

    /// Temperature as sent in the form, e.g. `0` or `0.2`.
    pub(crate) fn temperature_field(&self) -> String {
        // -0.0 + 0.0 == +0.0, never "-0"
        (self.temperature + 0.0).to_string()
    }
}

/// On-disk configuration. Every key is optional and overrides the default.
///
/// ```json
/// { "api_key": "sk-...", "language": "en", "fail_on_http_error": true }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub response_format: Option<String>,
    pub temperature: Option<f32>,
    pub language: Option<String>,
    pub fail_on_http_error: Option<bool>,
}

impl ConfigFile {
    /// Default location, `~/.config/radioscribe/config.json` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("radioscribe").join("config.json"))
    }

    /// Load and parse a config file. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file = serde_json::from_str(&raw).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(file)
    }

    /// Load the file at [`ConfigFile::default_path`], or an empty config when
    /// there is none.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::fs;

    #[test]
    fn test_defaults_match_dispatch_setup() {
        let opts = TranscribeOptions::default();
        assert_eq!(opts.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(opts.model, "whisper-1");
        assert_eq!(opts.response_format, "json");
        assert_eq!(opts.language, "en");
        assert_eq!(opts.temperature_field(), "0");
        assert!(opts.prompt.starts_with("Transcribe the radio dispatch audio."));
        assert!(opts.api_key.is_none());
        assert!(!opts.fail_on_http_error);
    }

    #[test]
    fn test_temperature_field_fractional() {
        let opts = TranscribeOptions::new().temperature(0.2).unwrap();
        assert_eq!(opts.temperature_field(), "0.2");
    }

    #[test]
    fn test_temperature_negative_zero_sent_as_zero() {
        let opts = TranscribeOptions::new().temperature(-0.0).unwrap();
        assert_eq!(opts.temperature_field(), "0");
    }

    #[test]
    fn test_temperature_out_of_range() {
        let result = TranscribeOptions::new().temperature(1.5);
        assert!(matches!(result, Err(Error::InvalidOption(_))));

        let result = TranscribeOptions::new().temperature(-0.1);
        assert!(matches!(result, Err(Error::InvalidOption(_))));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let result = TranscribeOptions::new().endpoint("  ");
        assert!(matches!(result, Err(Error::InvalidOption(_))));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let opts = TranscribeOptions::new().api_key("sk-very-secret");
        let debug = format!("{:?}", opts);
        assert!(!debug.contains("sk-very-secret"));
    }

    #[test]
    fn test_apply_config_overrides() {
        let file = ConfigFile {
            api_key: Some("from-file".into()),
            language: Some("es".into()),
            temperature: Some(0.4),
            fail_on_http_error: Some(true),
            ..ConfigFile::default()
        };
        let opts = TranscribeOptions::new().apply_config(&file).unwrap();
        assert_eq!(opts.api_key.as_ref().unwrap().expose_secret(), "from-file");
        assert_eq!(opts.language, "es");
        assert_eq!(opts.temperature_field(), "0.4");
        assert!(opts.fail_on_http_error);
        // Untouched keys keep their defaults
        assert_eq!(opts.model, DEFAULT_MODEL);
        assert_eq!(opts.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_builder_after_config_wins() {
        let file = ConfigFile {
            model: Some("from-file".into()),
            ..ConfigFile::default()
        };
        let opts = TranscribeOptions::new()
            .apply_config(&file)
            .unwrap()
            .model("from-flag");
        assert_eq!(opts.model, "from-flag");
    }

    #[test]
    fn test_apply_config_invalid_temperature() {
        let file = ConfigFile {
            temperature: Some(3.0),
            ..ConfigFile::default()
        };
        let result = TranscribeOptions::new().apply_config(&file);
        assert!(matches!(result, Err(Error::InvalidOption(_))));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "endpoint": "http://localhost:9000/v1/audio/transcriptions", "model": "whisper-large" }"#,
        )
        .unwrap();

        let file = ConfigFile::load(&path).unwrap();
        assert_eq!(
            file.endpoint.as_deref(),
            Some("http://localhost:9000/v1/audio/transcriptions")
        );
        assert_eq!(file.model.as_deref(), Some("whisper-large"));
        assert!(file.api_key.is_none());
    }

    #[test]
    fn test_load_config_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "modle": "typo" }"#).unwrap();

        let result = ConfigFile::load(&path);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = ConfigFile::load(Path::new("/nonexistent/radioscribe.json"));
        match result {
            Err(Error::Config { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/radioscribe.json"))
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
