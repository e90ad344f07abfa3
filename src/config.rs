use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const ENV_FILE_NAME: &str = ".env";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FILE_NAME: &str = "ticket_hook_debug.log";
const DEFAULT_LOG_FILTER: &str = "error";

const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_URL: &str = "https://github.com";
const DEFAULT_AZURE_URL: &str = "https://dev.azure.com";

#[derive(Debug, Clone, Default)]
pub struct GitLabSettings {
    pub base_url: String,
    pub token: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GitHubSettings {
    pub api_url: String,
    pub web_url: String,
    pub token: Option<String>,
    pub repo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AzureSettings {
    pub base_url: String,
    pub token: Option<String>,
    pub org: Option<String>,
    pub project: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Lower-cased `TICKET_PLATFORM`; `None` when unset or blank.
    pub platform: Option<String>,
    pub ticket_patterns: Vec<String>,
    pub api_timeout: Duration,
    pub gitlab: GitLabSettings,
    pub github: GitHubSettings,
    pub azure: AzureSettings,
    pub debug_log: Option<PathBuf>,
    pub log_filter: String,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    /// Process environment wins over the workspace `.env` file.
    pub fn load(workspace_root: &Path) -> AppResult<Self> {
        let file_values = read_env_file(&workspace_root.join(ENV_FILE_NAME))?;
        Self::from_lookup(workspace_root, |key| {
            env::var(key).ok().or_else(|| file_values.get(key).cloned())
        })
    }

    pub fn from_lookup<F>(workspace_root: &Path, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let platform = get("TICKET_PLATFORM").map(|value| value.to_lowercase());

        let ticket_patterns = get("TICKET_REGEX")
            .map(|value| split_patterns(&value))
            .unwrap_or_default();

        let api_timeout = match get("TICKET_API_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                AppError::Configuration(format!(
                    "TICKET_API_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let debug_enabled = get("DEBUG_TICKET_HOOK")
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let debug_log = debug_enabled.then(|| match get("TICKET_HOOK_LOG_FILE") {
            Some(file) => workspace_root.join(file),
            None => git_dir(workspace_root).join(DEFAULT_LOG_FILE_NAME),
        });

        Ok(Self {
            platform,
            ticket_patterns,
            api_timeout,
            gitlab: GitLabSettings {
                base_url: get("GITLAB_URL").unwrap_or_else(|| DEFAULT_GITLAB_URL.to_string()),
                token: get("GITLAB_TOKEN"),
                project_id: get("GITLAB_PROJECT_ID"),
            },
            github: GitHubSettings {
                api_url: get("GITHUB_API_URL")
                    .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
                web_url: get("GITHUB_URL").unwrap_or_else(|| DEFAULT_GITHUB_URL.to_string()),
                token: get("GITHUB_TOKEN"),
                repo: get("GITHUB_REPO"),
            },
            azure: AzureSettings {
                base_url: get("AZURE_URL").unwrap_or_else(|| DEFAULT_AZURE_URL.to_string()),
                token: get("AZURE_TOKEN"),
                org: get("AZURE_ORG"),
                project: get("AZURE_PROJECT"),
            },
            debug_log,
            log_filter: get("TICKET_HOOK_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            workspace_root: workspace_root.to_path_buf(),
        })
    }
}

/// The repository's git directory. In a linked worktree `.git` is a file holding
/// `gitdir: <path>`.
fn git_dir(workspace_root: &Path) -> PathBuf {
    let dot_git = workspace_root.join(".git");
    if dot_git.is_file() {
        if let Ok(contents) = std::fs::read_to_string(&dot_git) {
            if let Some(target) = contents.trim().strip_prefix("gitdir:") {
                return workspace_root.join(target.trim());
            }
        }
    }
    dot_git
}

/// Splits a `TICKET_REGEX` list on commas that separate patterns. Commas inside
/// `{m,n}` repetitions or `[...]` classes stay in their pattern, and `\,` is a
/// literal comma.
fn split_patterns(value: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    let mut current = String::new();
    let mut braces = 0usize;
    let mut in_class = false;
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(',') => current.push(','),
                Some(escaped) => {
                    current.push('\\');
                    current.push(escaped);
                }
                None => current.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                current.push(c);
            }
            ']' if in_class => {
                in_class = false;
                current.push(c);
            }
            '{' if !in_class => {
                braces += 1;
                current.push(c);
            }
            '}' if !in_class => {
                braces = braces.saturating_sub(1);
                current.push(c);
            }
            ',' if braces == 0 && !in_class => patterns.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    patterns.push(current);

    patterns
        .into_iter()
        .map(|pattern| pattern.trim().to_string())
        .filter(|pattern| !pattern.is_empty())
        .collect()
}

fn read_env_file(path: &Path) -> AppResult<HashMap<String, String>> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }

    let entries = dotenvy::from_path_iter(path).map_err(|err| {
        AppError::Configuration(format!("failed to read {}: {err}", path.display()))
    })?;

    let mut values = HashMap::new();
    for entry in entries {
        let (key, value) = entry.map_err(|err| {
            AppError::Configuration(format!("invalid entry in {}: {err}", path.display()))
        })?;
        values.insert(key, value);
    }
    Ok(values)
}
