//! Ask command implementation.

use crate::assistant::Assistant;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::session::SessionState;
use anyhow::Result;

/// Run the ask command: fetch a transcript and answer a single question.
pub async fn run_ask(
    input: &str,
    question: &str,
    model: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    if let Some(model) = model {
        settings.answer.model = model;
    }

    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'asktube doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let assistant = Assistant::new(settings)?;
    let mut state = SessionState::new();

    let spinner = Output::spinner("Fetching transcript...");

    match assistant.load_video(&mut state, input).await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            Output::info(&format!(
                "Loaded \"{}\" ({} chars)",
                outcome.title, outcome.chars
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    }

    let spinner = Output::spinner("Thinking...");

    match assistant.ask(&mut state, question).await {
        Ok(turn) => {
            spinner.finish_and_clear();
            println!("\n{}\n", turn.answer);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
