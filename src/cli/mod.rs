//! CLI module for asktube.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// asktube - Ask questions about YouTube videos
///
/// Fetches a video's caption transcript and answers natural-language questions
/// about it with an OpenAI-compatible chat model. Nothing is stored; each
/// session lives in memory.
#[derive(Parser, Debug)]
#[command(name = "asktube")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive Q&A session
    Chat {
        /// YouTube URL or video ID to load on startup
        input: Option<String>,

        /// Chat model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Fetch a transcript and ask a single question
    Ask {
        /// YouTube URL or video ID
        input: String,

        /// The question to ask
        question: String,

        /// Chat model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Fetch and print a video's transcript
    Transcript {
        /// YouTube URL or video ID
        input: String,

        /// Print the full transcript instead of a preview (text format)
        #[arg(short, long)]
        full: bool,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start an HTTP API server exposing one shared session
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Check configuration and API credentials
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
