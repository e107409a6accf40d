//! Configuration module for asktube.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnswerPrompts, Prompts};
pub use settings::{
    AnswerSettings, DisplaySettings, GeneralSettings, PromptSettings, Settings, YoutubeSettings,
};
