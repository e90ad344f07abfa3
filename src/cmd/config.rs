use clap::{Args, Subcommand};

use crate::config::{AppConfig, ENV_FILE_NAME};
use crate::domain::pattern::{DEFAULT_NUMERIC_PATTERN, DEFAULT_PROJECT_PATTERN};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked).
    Show,
}

pub fn run(config: &AppConfig, command: ConfigCommand) {
    match command {
        ConfigCommand::Show => {
            for line in render(config) {
                println!("{line}");
            }
        }
    }
}

fn render(config: &AppConfig) -> Vec<String> {
    let patterns = if config.ticket_patterns.is_empty() {
        format!("<default> {DEFAULT_PROJECT_PATTERN} , {DEFAULT_NUMERIC_PATTERN}")
    } else {
        config.ticket_patterns.join(" , ")
    };

    vec![
        format!(
            "Environment file: {}",
            config.workspace_root.join(ENV_FILE_NAME).display()
        ),
        format!("Ticket platform: {}", display_value(&config.platform)),
        format!("Ticket patterns: {patterns}"),
        format!("API timeout: {}s", config.api_timeout.as_secs()),
        format!(
            "Debug log: {}",
            config
                .debug_log
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<disabled>".to_string())
        ),
        String::new(),
        format!("GitLab URL: {}", config.gitlab.base_url),
        format!("GitLab token: {}", mask_secret(&config.gitlab.token)),
        format!("GitLab project id: {}", display_value(&config.gitlab.project_id)),
        String::new(),
        format!("GitHub API URL: {}", config.github.api_url),
        format!("GitHub token: {}", mask_secret(&config.github.token)),
        format!("GitHub repository: {}", display_value(&config.github.repo)),
        String::new(),
        format!("Azure DevOps URL: {}", config.azure.base_url),
        format!("Azure token: {}", mask_secret(&config.azure.token)),
        format!("Azure organization: {}", display_value(&config.azure.org)),
        format!("Azure project: {}", display_value(&config.azure.project)),
    ]
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
