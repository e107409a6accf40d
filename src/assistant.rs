//! Session driver for asktube.
//!
//! Coordinates the pipeline from pasted URL to displayed answer: parse the
//! video ID, fetch its captions, assemble the prompt, call the answer
//! service, and record the outcome in a [`SessionState`]. The collaborator
//! clients sit behind trait objects so tests can script them.

use crate::answer::{AnswerService, ChatAnswerService};
use crate::config::{Prompts, Settings};
use crate::error::{AsktubeError, Result};
use crate::prompt;
use crate::session::{ConversationTurn, SessionState};
use crate::youtube::{CaptionClient, CaptionSource, VideoId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// The main driver for a Q&A session.
pub struct Assistant {
    settings: Settings,
    prompts: Prompts,
    captions: Arc<dyn CaptionSource>,
    answers: Arc<dyn AnswerService>,
}

impl Assistant {
    /// Create an assistant with real collaborator clients.
    ///
    /// The API credential is resolved here, once; a missing key surfaces as
    /// a `Config` error before any question can be asked.
    pub fn new(settings: Settings) -> Result<Self> {
        // Load prompts (with optional custom directory and variables)
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let captions: Arc<dyn CaptionSource> = Arc::new(CaptionClient::new(
            settings.youtube.language.clone(),
            Duration::from_secs(settings.youtube.request_timeout_secs),
        ));

        let answers: Arc<dyn AnswerService> = Arc::new(ChatAnswerService::new(&settings.answer)?);

        Ok(Self {
            settings,
            prompts,
            captions,
            answers,
        })
    }

    /// Create an assistant with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        captions: Arc<dyn CaptionSource>,
        answers: Arc<dyn AnswerService>,
    ) -> Self {
        Self {
            settings,
            prompts,
            captions,
            answers,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Parse user input and load that video's transcript into the session.
    ///
    /// On any failure the session records it and keeps whatever was loaded
    /// before.
    #[instrument(skip(self, state), fields(input = %input))]
    pub async fn load_video(&self, state: &mut SessionState, input: &str) -> Result<FetchOutcome> {
        let video = match VideoId::parse(input) {
            Ok(v) => v,
            Err(e) => {
                let err: AsktubeError = e.into();
                state.record_failure(&err);
                return Err(err);
            }
        };

        info!("Fetching transcript for {}", video);
        match self.captions.fetch(&video).await {
            Ok(transcript) => {
                let outcome = FetchOutcome {
                    video,
                    title: transcript.title.clone(),
                    language: transcript.language.clone(),
                    chars: transcript.char_count(),
                };
                state.load(transcript);
                Ok(outcome)
            }
            Err(e) => {
                let err: AsktubeError = e.into();
                state.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Ask a question about the loaded transcript.
    ///
    /// Rejected outright when nothing is loaded; that is a caller mistake,
    /// not a failed session action, so the phase is left alone.
    #[instrument(skip(self, state), fields(question = %question))]
    pub async fn ask(&self, state: &mut SessionState, question: &str) -> Result<ConversationTurn> {
        let Some(transcript) = state.transcript() else {
            return Err(AsktubeError::NoVideoLoaded);
        };

        let built = prompt::build(
            &self.prompts,
            transcript,
            question,
            state.history(),
            self.settings.answer.max_history_turns,
        );

        match self.answers.answer(&built).await {
            Ok(answer) => {
                let turn = ConversationTurn::new(question, answer);
                state.record_turn(turn.clone());
                Ok(turn)
            }
            Err(e) => {
                let err: AsktubeError = e.into();
                state.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Reset the session to empty.
    pub fn clear(&self, state: &mut SessionState) {
        state.clear();
    }
}

/// Result of loading a video.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The parsed video ID.
    pub video: VideoId,
    /// Video title reported by the player response.
    pub title: String,
    /// Language code of the caption track actually used.
    pub language: String,
    /// Character count of the fetched transcript.
    pub chars: usize,
}
