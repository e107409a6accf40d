//! asktube - Ask questions about YouTube videos
//!
//! A CLI tool that fetches a video's caption transcript and answers
//! natural-language questions about it with an OpenAI-compatible chat model.
//!
//! # Overview
//!
//! asktube allows you to:
//! - Load any YouTube video that has captions
//! - Ask questions answered strictly from the transcript
//! - Keep a conversation going; earlier turns travel with each question
//! - Print or export the raw transcript
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `youtube` - Video ID parsing and the caption fetching client
//! - `prompt` - Prompt assembly from transcript, question, and history
//! - `answer` - Chat completion client for answer generation
//! - `session` - In-memory session state
//! - `assistant` - Coordination of fetch, ask, and clear on a session
//!
//! # Example
//!
//! ```rust,no_run
//! use asktube::assistant::Assistant;
//! use asktube::config::Settings;
//! use asktube::session::SessionState;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let assistant = Assistant::new(settings)?;
//!     let mut session = SessionState::new();
//!
//!     assistant
//!         .load_video(&mut session, "https://youtu.be/dQw4w9WgXcQ")
//!         .await?;
//!     let turn = assistant.ask(&mut session, "What is the video about?").await?;
//!     println!("{}", turn.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod prompt;
pub mod session;
pub mod youtube;

pub use error::{AsktubeError, Result};
