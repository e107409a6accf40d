//! Error types for asktube.

use thiserror::Error;

/// Failure to extract a video ID from user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not extract an 11-character video ID from '{input}'")]
pub struct ParseError {
    /// The raw input that did not match any accepted URL shape.
    pub input: String,
}

/// Failures while fetching a caption transcript.
///
/// Each variant maps to a distinct user-facing message; none is retried.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("no caption track is available for video {0}")]
    NoCaptions(String),

    #[error("captions are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("video {video} is unavailable: {reason}")]
    VideoUnavailable { video: String, reason: String },

    #[error("caption request failed: {0}")]
    Network(String),
}

/// Failures while generating an answer.
#[derive(Error, Debug, Clone)]
pub enum AnswerError {
    #[error("model API authentication failed: {0}")]
    Auth(String),

    #[error("model API quota exceeded: {0}")]
    Quota(String),

    #[error("model API request failed: {0}")]
    Network(String),

    #[error("model returned an unusable response: {0}")]
    Model(String),
}

/// Library-level error type for asktube operations.
#[derive(Error, Debug)]
pub enum AsktubeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Answer(#[from] AnswerError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no transcript loaded; fetch a video before asking questions")]
    NoVideoLoaded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AsktubeError {
    /// Stable taxonomy name for this error.
    ///
    /// Used by the HTTP facade's error bodies and recorded in session state
    /// so callers can tell what kind of action failed.
    pub fn kind(&self) -> &'static str {
        match self {
            AsktubeError::Parse(_) => "parse",
            AsktubeError::Fetch(FetchError::NoCaptions(_)) => "no_captions",
            AsktubeError::Fetch(FetchError::TranscriptsDisabled(_)) => "transcripts_disabled",
            AsktubeError::Fetch(FetchError::VideoUnavailable { .. }) => "video_unavailable",
            AsktubeError::Fetch(FetchError::Network(_)) => "fetch_network",
            AsktubeError::Answer(AnswerError::Auth(_)) => "auth",
            AsktubeError::Answer(AnswerError::Quota(_)) => "quota",
            AsktubeError::Answer(AnswerError::Network(_)) => "answer_network",
            AsktubeError::Answer(AnswerError::Model(_)) => "model",
            AsktubeError::Config(_) => "config",
            AsktubeError::NoVideoLoaded => "no_video",
            AsktubeError::Io(_) => "io",
            AsktubeError::Json(_) => "json",
            AsktubeError::TomlParse(_) => "toml",
        }
    }
}

/// Result type alias for asktube operations.
pub type Result<T> = std::result::Result<T, AsktubeError>;
