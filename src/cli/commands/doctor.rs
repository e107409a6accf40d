//! Doctor command - verify configuration and credentials.

use crate::cli::Output;
use crate::config::{AnswerSettings, Settings};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks. Everything here is offline; no requests are
/// made to YouTube or the answer API.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("asktube Doctor");
    println!();
    println!("Checking configuration and credentials...\n");

    let mut checks = Vec::new();

    // Check API credentials
    println!("{}", style("API Configuration").bold());
    let api_check = check_api_key(&settings.answer);
    api_check.print();
    checks.push(api_check);

    println!();

    // Show the effective answer service configuration
    println!("{}", style("Answer Service").bold());
    Output::kv("Model", &settings.answer.model);
    Output::kv(
        "Endpoint",
        settings
            .answer
            .api_base
            .as_deref()
            .unwrap_or("https://api.openai.com/v1 (default)"),
    );
    Output::kv(
        "History sent per question",
        &format!("last {} turns", settings.answer.max_history_turns),
    );
    let temp_check = check_temperature(settings.answer.temperature);
    if let Some(check) = &temp_check {
        check.print();
    }
    checks.extend(temp_check);

    println!();

    // Show the transcript fetching configuration
    println!("{}", style("Transcript Fetching").bold());
    Output::kv("Caption language", &settings.youtube.language);
    Output::kv(
        "Request timeout",
        &format!("{}s", settings.youtube.request_timeout_secs),
    );

    println!();

    // Check configuration files
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);
    if let Some(check) = check_custom_prompts(settings) {
        check.print();
        checks.push(check);
    }

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using asktube.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! asktube is ready to use.");
    }

    Ok(())
}

/// Check if the answer API key is configured.
fn check_api_key(answer: &AnswerSettings) -> CheckResult {
    let var = answer.api_key_env.as_str();

    match std::env::var(var) {
        Ok(key) if key.trim().is_empty() => CheckResult::error(
            var,
            "empty",
            &format!("Set with: export {}='...'", var),
        ),
        Ok(key) => {
            let key = key.trim();
            let masked = mask_key(key);
            // Custom endpoints (Gemini etc.) use their own key formats
            if answer.api_base.is_none() && !key.starts_with("sk-") {
                CheckResult::warning(
                    var,
                    &format!("set ({}) but format looks unusual", masked),
                    "OpenAI keys start with sk-; set answer.api_base for other providers",
                )
            } else {
                CheckResult::ok(var, &format!("configured ({})", masked))
            }
        }
        Err(_) => CheckResult::error(
            var,
            "not set",
            &format!("Set with: export {}='...'", var),
        ),
    }
}

/// Mask an API key for display, keeping the first and last few characters.
fn mask_key(key: &str) -> String {
    if key.len() > 12 && key.is_ascii() {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "***".to_string()
    }
}

/// Flag temperatures outside the range chat APIs accept.
fn check_temperature(temperature: f32) -> Option<CheckResult> {
    if (0.0..=2.0).contains(&temperature) {
        None
    } else {
        Some(CheckResult::warning(
            "Temperature",
            &format!("{} is outside the usual 0-2 range", temperature),
            "Adjust answer.temperature in the config file",
        ))
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: asktube config edit",
        )
    }
}

/// Check the custom prompts directory, when one is configured.
fn check_custom_prompts(settings: &Settings) -> Option<CheckResult> {
    let dir = settings.prompts.custom_dir.as_deref()?;
    let expanded = shellexpand::tilde(dir).to_string();

    if std::path::Path::new(&expanded).is_dir() {
        Some(CheckResult::ok("Custom prompts", &expanded))
    } else {
        Some(CheckResult::warning(
            "Custom prompts",
            &format!("{} not found", expanded),
            "Built-in prompts will be used instead",
        ))
    }
}
