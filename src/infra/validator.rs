//! Platform selection for ticket existence checks.
//!
//! The set of platforms is closed: each one is a variant of [`TicketValidator`]
//! and an entry in [`PLATFORMS`]. Unknown or unset platform names fall back to
//! [`TicketValidator::Noop`], which accepts every ticket.

use async_trait::async_trait;
use tracing::warn;

use crate::config::AppConfig;
use crate::domain::ticket::TicketId;
use crate::infra::azure::AzureClient;
use crate::infra::github::GitHubClient;
use crate::infra::gitlab::GitLabClient;
use crate::infra::http::ApiClient;
use crate::services::{IssueTrackerService, ValidationOutcome};

pub enum TicketValidator {
    GitLab(GitLabClient),
    GitHub(GitHubClient),
    Azure(AzureClient),
    Noop,
}

pub const NOOP_PLATFORM: &str = "none";

type Constructor = fn(&AppConfig, ApiClient) -> TicketValidator;

pub const PLATFORMS: &[(&str, Constructor)] = &[
    ("gitlab", |config: &AppConfig, api: ApiClient| {
        TicketValidator::GitLab(GitLabClient::new(config.gitlab.clone(), api))
    }),
    ("github", |config: &AppConfig, api: ApiClient| {
        TicketValidator::GitHub(GitHubClient::new(config.github.clone(), api))
    }),
    ("azure", |config: &AppConfig, api: ApiClient| {
        TicketValidator::Azure(AzureClient::new(config.azure.clone(), api))
    }),
];

impl TicketValidator {
    pub fn select(platform: &str, config: &AppConfig, api: ApiClient) -> Self {
        let name = platform.trim().to_lowercase();
        PLATFORMS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, build)| build(config, api))
            .unwrap_or(TicketValidator::Noop)
    }
}

#[async_trait]
impl IssueTrackerService for TicketValidator {
    fn platform(&self) -> &str {
        match self {
            TicketValidator::GitLab(client) => client.platform(),
            TicketValidator::GitHub(client) => client.platform(),
            TicketValidator::Azure(client) => client.platform(),
            TicketValidator::Noop => NOOP_PLATFORM,
        }
    }

    fn is_noop(&self) -> bool {
        matches!(self, TicketValidator::Noop)
    }

    async fn exists(&self, ticket: &TicketId) -> ValidationOutcome {
        match self {
            TicketValidator::GitLab(client) => client.exists(ticket).await,
            TicketValidator::GitHub(client) => client.exists(ticket).await,
            TicketValidator::Azure(client) => client.exists(ticket).await,
            TicketValidator::Noop => ValidationOutcome::Exists,
        }
    }
}

/// Fail-open result for a platform whose credentials are incomplete.
pub(crate) fn skip_missing(label: &str, fields: &[(&str, bool)]) -> ValidationOutcome {
    let missing = fields
        .iter()
        .filter(|(_, is_missing)| *is_missing)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");
    let reason = format!("{label} validation skipped: {missing} missing");
    warn!("{reason}");
    ValidationOutcome::Skipped { reason }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use super::*;

    fn config() -> AppConfig {
        AppConfig::from_lookup(Path::new("/repo"), |_| None).unwrap()
    }

    fn api() -> ApiClient {
        ApiClient::new(Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn selects_known_platforms_case_insensitively() {
        let config = config();
        assert_eq!(TicketValidator::select("gitlab", &config, api()).platform(), "gitlab");
        assert_eq!(TicketValidator::select("GitHub", &config, api()).platform(), "github");
        assert_eq!(TicketValidator::select(" AZURE ", &config, api()).platform(), "azure");
    }

    #[test]
    fn unknown_platforms_fall_back_to_noop() {
        let config = config();
        assert!(TicketValidator::select("jira", &config, api()).is_noop());
        assert_eq!(
            TicketValidator::select("", &config, api()).platform(),
            NOOP_PLATFORM
        );
        assert!(!TicketValidator::select("github", &config, api()).is_noop());
    }

    #[tokio::test]
    async fn noop_accepts_everything() {
        let validator = TicketValidator::Noop;
        let ticket = TicketId::from_token("NOPE-404").unwrap();
        assert_eq!(validator.exists(&ticket).await, ValidationOutcome::Exists);
    }

    #[tokio::test]
    async fn unconfigured_platforms_always_pass() {
        let config = config();
        let ticket = TicketId::from_token("#1").unwrap();
        for (name, _) in PLATFORMS {
            let outcome = TicketValidator::select(name, &config, api())
                .exists(&ticket)
                .await;
            assert!(matches!(outcome, ValidationOutcome::Skipped { .. }), "{name}");
            assert!(outcome.passed());
        }
    }

    #[test]
    fn skip_reason_lists_every_missing_field() {
        let outcome = skip_missing("Azure DevOps", &[("AZURE_TOKEN", true), ("AZURE_ORG", false), ("AZURE_PROJECT", true)]);
        assert_eq!(
            outcome,
            ValidationOutcome::Skipped {
                reason: "Azure DevOps validation skipped: AZURE_TOKEN, AZURE_PROJECT missing"
                    .to_string()
            }
        );
    }
}
