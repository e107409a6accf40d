//! Pre-flight checks before expensive operations.
//!
//! Validates that required configuration is in place before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Asking questions requires an API key for the answer service.
    Ask,
    /// Fetching transcripts has no credential requirements.
    Fetch,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Ask => {
            crate::openai::resolve_api_key(&settings.answer)?;
        }
        Operation::Fetch => {
            // Caption fetching talks to YouTube anonymously
        }
    }
    Ok(())
}
