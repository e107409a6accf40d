//! Transcript command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::youtube::{CaptionClient, CaptionSource, VideoId};
use anyhow::Result;
use std::time::Duration;

/// Run the transcript command: fetch a transcript and print or save it.
///
/// No API key is needed here; the captions come straight from YouTube.
pub async fn run_transcript(
    input: &str,
    full: bool,
    format: &str,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    let video = match VideoId::parse(input) {
        Ok(video) => video,
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info(
                "Accepted: youtube.com/watch?v=..., youtu.be/..., or an 11-character video ID.",
            );
            return Err(e.into());
        }
    };

    let client = CaptionClient::new(
        settings.youtube.language.clone(),
        Duration::from_secs(settings.youtube.request_timeout_secs),
    );

    let spinner = Output::spinner("Fetching transcript...");

    let transcript = match client.fetch(&video).await {
        Ok(transcript) => {
            spinner.finish_and_clear();
            transcript
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&transcript)?,
        "text" => {
            if full {
                transcript.text.clone()
            } else {
                transcript.preview(settings.display.preview_chars)
            }
        }
        other => {
            Output::error(&format!("Unknown format: {} (expected text or json)", other));
            return Err(anyhow::anyhow!("unknown format: {}", other));
        }
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)?;
            Output::success(&format!(
                "Wrote \"{}\" [{}] to {}",
                transcript.title, transcript.video, path
            ));
        }
        None => {
            Output::info(&format!(
                "\"{}\" [{}] ({} chars, captions: {})",
                transcript.title,
                transcript.video,
                transcript.char_count(),
                transcript.language
            ));
            println!("\n{}", rendered);
            if format == "text" && !full && transcript.char_count() > settings.display.preview_chars
            {
                println!();
                Output::info("Showing a preview; pass --full for the whole transcript.");
            }
        }
    }

    Ok(())
}
