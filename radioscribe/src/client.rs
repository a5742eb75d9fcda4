use std::path::Path;

use futures_util::StreamExt;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::config::TranscribeOptions;
use crate::error::{Error, Result};
use crate::form;

/// Client for the audio transcription endpoint.
///
/// One call to [`transcribe`](Self::transcribe) sends exactly one request.
/// There are no retries and no timeout.
pub struct TranscriptionClient {
    http: reqwest::Client,
    options: TranscribeOptions,
}

impl TranscriptionClient {
    pub fn new(options: TranscribeOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("radioscribe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Initialization(e.to_string()))?;

        Ok(Self { http, options })
    }

    /// Upload an audio file and return the raw response body.
    ///
    /// The body is returned as-is whatever the HTTP status, unless
    /// `fail_on_http_error` is set, in which case a non-2xx status yields
    /// [`Error::Api`].
    pub async fn transcribe(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let api_key = self.options.api_key.as_ref().ok_or(Error::MissingApiKey)?;

        let form = form::build_form(path, &self.options).await?;

        info!(endpoint = %self.options.endpoint, model = %self.options.model, "sending transcription request");
        let response = self
            .http
            .post(&self.options.endpoint)
            .bearer_auth(api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(Error::transport)?;

        let status = response.status();

        // Accumulate the body as it streams in
        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(Error::transport)?;
            body.extend_from_slice(&chunk);
        }
        let body = String::from_utf8_lossy(&body).into_owned();

        if !status.is_success() {
            warn!(status = status.as_u16(), "transcription API returned an error status");
            if self.options.fail_on_http_error {
                return Err(Error::Api {
                    status: status.as_u16(),
                    body,
                });
            }
        }

        info!(status = status.as_u16(), bytes = body.len(), "transcription received");
        Ok(body)
    }
}
