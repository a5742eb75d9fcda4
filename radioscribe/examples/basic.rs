//! Transcribe a local recording and print the raw JSON response.
//!
//! Usage: OPENAI_API_KEY=sk-... cargo run --example basic -- path/to/call.mp3

#[tokio::main]
async fn main() -> radioscribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: basic <audio-file>");

    let json = radioscribe::transcribe_file(&path).await?;

    println!("{json}");

    Ok(())
}
