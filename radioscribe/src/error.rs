use std::error::Error as StdError;
use std::path::PathBuf;

/// All errors that can occur in radioscribe.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP client initialization failed: {0}")]
    Initialization(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("audio file not found: {path}")]
    AudioNotFound { path: PathBuf },

    #[error("no API key configured — set OPENAI_API_KEY or api_key in the config file")]
    MissingApiKey,

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a transport error that keeps the whole source chain of a reqwest
    /// error, e.g. "error sending request: ...: Connection refused".
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = StdError::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Error::Transport(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
