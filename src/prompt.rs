//! Prompt assembly for transcript Q&A.
//!
//! Builds the payload sent to the answer service: the constraining system
//! instruction, a capped window of prior turns, and a user message rendered
//! from the `{{transcript}}`/`{{question}}` template.

use crate::config::Prompts;
use crate::session::ConversationTurn;
use crate::youtube::Transcript;
use std::collections::HashMap;

/// A fully assembled prompt, ready for the answer service.
#[derive(Debug, Clone)]
pub struct BuiltPrompt {
    /// System instruction constraining answers to the transcript.
    pub system: String,
    /// Prior turns to re-send, oldest first, already capped.
    pub history: Vec<ConversationTurn>,
    /// User message carrying the full transcript and the question.
    pub user: String,
}

/// Assemble the prompt for one question.
///
/// The user payload always embeds the full transcript text and the literal
/// question. Prior turns ride along as plain exchanges without re-embedding
/// the transcript; only the most recent `max_turns` are kept.
pub fn build(
    prompts: &Prompts,
    transcript: &Transcript,
    question: &str,
    history: &[ConversationTurn],
    max_turns: usize,
) -> BuiltPrompt {
    let mut vars = HashMap::new();
    vars.insert("transcript".to_string(), transcript.text.clone());
    vars.insert("question".to_string(), question.to_string());

    let user = prompts.render_with_custom(&prompts.answer.user, &vars);
    let system = prompts.render_with_custom(&prompts.answer.system, &HashMap::new());

    let start = history.len().saturating_sub(max_turns);
    let history = history[start..].to_vec();

    BuiltPrompt {
        system,
        history,
        user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::VideoId;

    fn transcript(text: &str) -> Transcript {
        Transcript {
            video: VideoId::parse("dQw4w9WgXcQ").unwrap(),
            title: "Test Video".to_string(),
            language: "en".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_user_payload_contains_transcript_and_question() {
        let prompts = Prompts::default();
        let t = transcript("the speaker explains ownership and borrowing");

        let built = build(&prompts, &t, "What is the video about?", &[], 20);

        assert!(built
            .user
            .contains("the speaker explains ownership and borrowing"));
        assert!(built.user.contains("What is the video about?"));
    }

    #[test]
    fn test_system_constrains_to_transcript() {
        let prompts = Prompts::default();
        let built = build(&prompts, &transcript("text"), "q", &[], 20);

        assert!(built
            .system
            .contains("This information is not available in the video transcript."));
    }

    #[test]
    fn test_history_is_chronological() {
        let prompts = Prompts::default();
        let history = vec![
            ConversationTurn::new("first?", "one"),
            ConversationTurn::new("second?", "two"),
        ];

        let built = build(&prompts, &transcript("text"), "third?", &history, 20);

        assert_eq!(built.history.len(), 2);
        assert_eq!(built.history[0].question, "first?");
        assert_eq!(built.history[1].question, "second?");
        // The transcript only lives in the current user payload, not in history
        assert!(!built.history[0].answer.contains("text"));
    }

    #[test]
    fn test_history_capped_to_most_recent() {
        let prompts = Prompts::default();
        let history: Vec<ConversationTurn> = (0..10)
            .map(|i| ConversationTurn::new(format!("q{}", i), format!("a{}", i)))
            .collect();

        let built = build(&prompts, &transcript("text"), "latest?", &history, 3);

        assert_eq!(built.history.len(), 3);
        assert_eq!(built.history[0].question, "q7");
        assert_eq!(built.history[2].question, "q9");
    }

    #[test]
    fn test_custom_variables_flow_into_templates() {
        let mut prompts = Prompts::default();
        prompts.answer.user = "{{greeting}} {{transcript}} / {{question}}".to_string();
        prompts
            .variables
            .insert("greeting".to_string(), "Hei".to_string());

        let built = build(&prompts, &transcript("captions"), "spørsmål?", &[], 20);

        assert_eq!(built.user, "Hei captions / spørsmål?");
    }
}
