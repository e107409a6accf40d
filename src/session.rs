//! Session state for a transcript Q&A conversation.
//!
//! `SessionState` is a plain value with pure transitions; all I/O lives in
//! the [`Assistant`](crate::assistant::Assistant) that drives it. A session
//! has three observable phases: `Empty` (nothing loaded), `Loaded` (a
//! transcript is queryable), and `Error` (the last action failed). `Error`
//! preserves whatever was loaded before, so a failed fetch never destroys a
//! working session.

use crate::error::AsktubeError;
use crate::youtube::{Transcript, VideoId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One question/answer exchange.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        }
    }
}

/// Observable phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Empty,
    Loaded,
    Error,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Empty => write!(f, "empty"),
            Phase::Loaded => write!(f, "loaded"),
            Phase::Error => write!(f, "error"),
        }
    }
}

/// The most recent failed action.
#[derive(Debug, Clone, Serialize)]
pub struct LastFailure {
    /// Error taxonomy name (see `AsktubeError::kind`).
    pub kind: String,
    /// User-facing message.
    pub message: String,
}

/// In-memory state of one Q&A session. Nothing persists across runs.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    transcript: Option<Transcript>,
    history: Vec<ConversationTurn>,
    last_failure: Option<LastFailure>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived phase: a recorded failure wins, then a loaded transcript.
    pub fn phase(&self) -> Phase {
        if self.last_failure.is_some() {
            Phase::Error
        } else if self.transcript.is_some() {
            Phase::Loaded
        } else {
            Phase::Empty
        }
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    /// The current video, read through the transcript so the two can never
    /// disagree.
    pub fn video(&self) -> Option<&VideoId> {
        self.transcript.as_ref().map(|t| &t.video)
    }

    /// Completed exchanges, oldest first.
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn last_failure(&self) -> Option<&LastFailure> {
        self.last_failure.as_ref()
    }

    /// Store a freshly fetched transcript and clear any recorded failure.
    ///
    /// History is kept even when this switches to a different video; only
    /// `clear` discards it.
    pub fn load(&mut self, transcript: Transcript) {
        self.transcript = Some(transcript);
        self.last_failure = None;
    }

    /// Append a completed exchange at the end of the history.
    pub fn record_turn(&mut self, turn: ConversationTurn) {
        self.history.push(turn);
        self.last_failure = None;
    }

    /// Record a failed action. The transcript and history stay untouched.
    pub fn record_failure(&mut self, error: &AsktubeError) {
        self.last_failure = Some(LastFailure {
            kind: error.kind().to_string(),
            message: error.to_string(),
        });
    }

    /// Reset the session to its initial empty state.
    pub fn clear(&mut self) {
        self.transcript = None;
        self.history.clear();
        self.last_failure = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn transcript(id: &str, text: &str) -> Transcript {
        Transcript {
            video: VideoId::parse(id).unwrap(),
            title: "Test Video".to_string(),
            language: "en".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let state = SessionState::new();
        assert_eq!(state.phase(), Phase::Empty);
        assert!(state.transcript().is_none());
        assert!(state.video().is_none());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_load_moves_to_loaded() {
        let mut state = SessionState::new();
        state.load(transcript("dQw4w9WgXcQ", "some captions"));

        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(state.video().unwrap().as_str(), "dQw4w9WgXcQ");
        assert_eq!(state.transcript().unwrap().text, "some captions");
    }

    #[test]
    fn test_failure_preserves_loaded_transcript() {
        let mut state = SessionState::new();
        state.load(transcript("dQw4w9WgXcQ", "first video captions"));

        let err: AsktubeError = FetchError::NoCaptions("aaaaaaaaaaa".to_string()).into();
        state.record_failure(&err);

        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.last_failure().unwrap().kind, "no_captions");
        // The previously loaded transcript is still queryable
        assert_eq!(state.transcript().unwrap().text, "first video captions");
        assert_eq!(state.video().unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_transcripts_disabled_failure_keeps_session_queryable() {
        let mut state = SessionState::new();
        state.load(transcript("dQw4w9WgXcQ", "loaded captions"));

        let err: AsktubeError = FetchError::TranscriptsDisabled("bbbbbbbbbbb".to_string()).into();
        state.record_failure(&err);

        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.last_failure().unwrap().kind, "transcripts_disabled");
        assert!(state.transcript().is_some());
    }

    #[test]
    fn test_record_turn_appends_in_order() {
        let mut state = SessionState::new();
        state.load(transcript("dQw4w9WgXcQ", "captions"));

        state.record_turn(ConversationTurn::new("first?", "one"));
        state.record_turn(ConversationTurn::new("second?", "two"));
        state.record_turn(ConversationTurn::new("third?", "three"));

        let questions: Vec<&str> = state.history().iter().map(|t| t.question.as_str()).collect();
        assert_eq!(questions, vec!["first?", "second?", "third?"]);
    }

    #[test]
    fn test_record_turn_clears_failure() {
        let mut state = SessionState::new();
        state.load(transcript("dQw4w9WgXcQ", "captions"));

        let err: AsktubeError = AsktubeError::Config("bad".to_string());
        state.record_failure(&err);
        assert_eq!(state.phase(), Phase::Error);

        state.record_turn(ConversationTurn::new("q", "a"));
        assert_eq!(state.phase(), Phase::Loaded);
        assert!(state.last_failure().is_none());
    }

    #[test]
    fn test_load_clears_failure() {
        let mut state = SessionState::new();
        let err: AsktubeError = FetchError::Network("timeout".to_string()).into();
        state.record_failure(&err);
        assert_eq!(state.phase(), Phase::Error);

        state.load(transcript("dQw4w9WgXcQ", "captions"));
        assert_eq!(state.phase(), Phase::Loaded);
        assert!(state.last_failure().is_none());
    }

    #[test]
    fn test_switching_videos_keeps_history() {
        let mut state = SessionState::new();
        state.load(transcript("dQw4w9WgXcQ", "first"));
        state.record_turn(ConversationTurn::new("about first?", "answer"));

        state.load(transcript("9bZkp7q19f0", "second"));

        assert_eq!(state.video().unwrap().as_str(), "9bZkp7q19f0");
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history()[0].question, "about first?");
    }

    #[test]
    fn test_clear_resets_from_any_phase() {
        // From Loaded with history
        let mut state = SessionState::new();
        state.load(transcript("dQw4w9WgXcQ", "captions"));
        state.record_turn(ConversationTurn::new("q", "a"));
        state.clear();
        assert_eq!(state.phase(), Phase::Empty);
        assert!(state.transcript().is_none());
        assert!(state.history().is_empty());

        // From Error
        let mut state = SessionState::new();
        let err: AsktubeError = FetchError::Network("down".to_string()).into();
        state.record_failure(&err);
        state.clear();
        assert_eq!(state.phase(), Phase::Empty);
        assert!(state.last_failure().is_none());

        // From Empty (no-op)
        let mut state = SessionState::new();
        state.clear();
        assert_eq!(state.phase(), Phase::Empty);
    }
}
