//! Interactive Q&A session over a video transcript.

use crate::assistant::Assistant;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::session::SessionState;
use crate::youtube::VideoId;
use console::style;
use std::io::{self, BufRead, Write};

/// One parsed line of REPL input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplCommand<'a> {
    Exit,
    Clear,
    History,
    Preview,
    Load(&'a str),
    Ask(&'a str),
    Empty,
}

/// Interpret one line of REPL input.
///
/// `load <url>` and a pasted YouTube URL both load a video; anything else is
/// a question about the loaded transcript. Bare video IDs need an explicit
/// `load`, since an eleven-letter word would otherwise be swallowed.
fn parse_repl_command(input: &str) -> ReplCommand<'_> {
    let input = input.trim();

    if input.is_empty() {
        return ReplCommand::Empty;
    }
    if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
        return ReplCommand::Exit;
    }
    if input.eq_ignore_ascii_case("clear") {
        return ReplCommand::Clear;
    }
    if input.eq_ignore_ascii_case("history") {
        return ReplCommand::History;
    }
    if input.eq_ignore_ascii_case("preview") {
        return ReplCommand::Preview;
    }
    if let Some(rest) = input.strip_prefix("load ") {
        return ReplCommand::Load(rest.trim());
    }
    if looks_like_video_url(input) {
        return ReplCommand::Load(input);
    }

    ReplCommand::Ask(input)
}

/// True for inputs that are unambiguously a YouTube URL.
fn looks_like_video_url(input: &str) -> bool {
    (input.contains("youtube.com") || input.contains("youtu.be"))
        && VideoId::parse(input).is_ok()
}

/// Run the interactive chat command.
pub async fn run_chat(
    input: Option<String>,
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
        return Err(e);
    }

    let assistant = Assistant::new(settings)?;
    let mut state = SessionState::new();

    println!("\n{}", style("asktube").bold().cyan());
    println!(
        "{}\n",
        style("Paste a YouTube URL to load a video, then ask questions about it.").dim()
    );
    println!(
        "{}\n",
        style("Commands: load <url>, preview, history, clear, exit").dim()
    );

    if let Some(input) = input {
        load_video(&assistant, &mut state, &input).await;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // stdin closed
            break;
        }

        match parse_repl_command(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Exit => {
                Output::info("Goodbye!");
                break;
            }
            ReplCommand::Clear => {
                assistant.clear(&mut state);
                Output::info("Session cleared.");
            }
            ReplCommand::History => print_history(&state),
            ReplCommand::Preview => print_preview(&assistant, &state),
            ReplCommand::Load(target) => load_video(&assistant, &mut state, target).await,
            ReplCommand::Ask(question) => {
                if state.transcript().is_none() {
                    Output::info("Load a video first: paste a YouTube URL or use 'load <url>'.");
                    continue;
                }

                let spinner = Output::spinner("Thinking...");
                match assistant.ask(&mut state, question).await {
                    Ok(turn) => {
                        spinner.finish_and_clear();
                        println!("\n{} {}\n", style("asktube:").cyan().bold(), turn.answer);
                    }
                    Err(e) => {
                        spinner.finish_and_clear();
                        Output::error(&format!("{}", e));
                    }
                }
            }
        }
    }

    Ok(())
}

/// Fetch a transcript into the session and report the outcome.
async fn load_video(assistant: &Assistant, state: &mut SessionState, input: &str) {
    let spinner = Output::spinner("Fetching transcript...");

    match assistant.load_video(state, input).await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            Output::success(&format!(
                "Loaded \"{}\" [{}] ({} chars, captions: {})",
                outcome.title, outcome.video, outcome.chars, outcome.language
            ));
            let display = &assistant.settings().display;
            if outcome.chars > display.warn_chars {
                Output::warning(
                    "This transcript is quite long. Answers may be slower or hit model limits.",
                );
            }
            Output::info("Ask away, or type 'preview' to see the transcript start.");
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("{}", e));
            match e.kind() {
                "parse" => Output::info(
                    "Accepted: youtube.com/watch?v=..., youtu.be/..., or an 11-character video ID.",
                ),
                "no_captions" | "transcripts_disabled" => {
                    Output::info("The previous video (if any) is still loaded.")
                }
                _ => {}
            }
        }
    }
}

/// Print the conversation so far.
fn print_history(state: &SessionState) {
    if state.history().is_empty() {
        Output::info("No questions asked yet.");
        return;
    }

    Output::header("Conversation");
    for (i, turn) in state.history().iter().enumerate() {
        println!(
            "\n{} {}",
            style(format!("{}. You:", i + 1)).green().bold(),
            turn.question
        );
        println!("{} {}", style("   asktube:").cyan().bold(), turn.answer);
    }
    println!();
}

/// Print the start of the loaded transcript.
fn print_preview(assistant: &Assistant, state: &SessionState) {
    match state.transcript() {
        Some(transcript) => {
            Output::header(&format!("Transcript of \"{}\"", transcript.title));
            println!(
                "\n{}\n",
                transcript.preview(assistant.settings().display.preview_chars)
            );
        }
        None => Output::info("No video loaded."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_control_words() {
        assert_eq!(parse_repl_command("exit"), ReplCommand::Exit);
        assert_eq!(parse_repl_command("QUIT"), ReplCommand::Exit);
        assert_eq!(parse_repl_command("clear"), ReplCommand::Clear);
        assert_eq!(parse_repl_command("history"), ReplCommand::History);
        assert_eq!(parse_repl_command("preview"), ReplCommand::Preview);
        assert_eq!(parse_repl_command("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_explicit_load() {
        assert_eq!(
            parse_repl_command("load dQw4w9WgXcQ"),
            ReplCommand::Load("dQw4w9WgXcQ")
        );
        assert_eq!(
            parse_repl_command("load  https://youtu.be/dQw4w9WgXcQ "),
            ReplCommand::Load("https://youtu.be/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_parse_pasted_url_loads() {
        assert_eq!(
            parse_repl_command("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            ReplCommand::Load("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        );
        assert_eq!(
            parse_repl_command("youtu.be/dQw4w9WgXcQ"),
            ReplCommand::Load("youtu.be/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_parse_question_passes_through() {
        assert_eq!(
            parse_repl_command("What is this video about?"),
            ReplCommand::Ask("What is this video about?")
        );
        // An eleven-letter word is a question, not a video ID
        assert_eq!(
            parse_repl_command("explanation"),
            ReplCommand::Ask("explanation")
        );
    }

    #[test]
    fn test_parse_broken_url_is_a_question() {
        // Contains a YouTube host but no extractable ID
        assert_eq!(
            parse_repl_command("youtube.com/watch"),
            ReplCommand::Ask("youtube.com/watch")
        );
    }
}
