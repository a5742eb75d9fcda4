//! Transcribe with a custom prompt and language, failing on API errors.
//!
//! Usage: OPENAI_API_KEY=sk-... cargo run --example options -- path/to/call.mp3

use radioscribe::{TranscribeOptions, TranscriptionClient};

#[tokio::main]
async fn main() -> radioscribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: options <audio-file>");

    let opts = TranscribeOptions::from_env()
        .prompt("Fire dispatch. Expect engine and ladder company numbers and street addresses.")
        .language("en")
        .temperature(0.2)?
        .fail_on_http_error(true);

    let client = TranscriptionClient::new(opts)?;
    let json = client.transcribe(&path).await?;

    println!("{json}");

    Ok(())
}
