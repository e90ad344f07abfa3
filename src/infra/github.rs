use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use crate::config::GitHubSettings;
use crate::domain::ticket::TicketId;
use crate::infra::http::ApiClient;
use crate::infra::validator::skip_missing;
use crate::services::{IssueTrackerService, ValidationOutcome};

pub struct GitHubClient {
    api: ApiClient,
    settings: GitHubSettings,
}

impl GitHubClient {
    pub fn new(settings: GitHubSettings, api: ApiClient) -> Self {
        Self { api, settings }
    }

    fn issue_endpoint(&self, repo: &str, number: &str) -> String {
        format!(
            "{}/repos/{}/issues/{}",
            self.settings.api_url.trim_end_matches('/'),
            repo.trim_matches('/'),
            number
        )
    }

    fn browse_url(&self, repo: &str, number: &str) -> String {
        format!(
            "{}/{}/issues/{}",
            self.settings.web_url.trim_end_matches('/'),
            repo.trim_matches('/'),
            number
        )
    }
}

#[async_trait]
impl IssueTrackerService for GitHubClient {
    fn platform(&self) -> &str {
        "github"
    }

    async fn exists(&self, ticket: &TicketId) -> ValidationOutcome {
        let (Some(token), Some(repo)) = (&self.settings.token, &self.settings.repo) else {
            return skip_missing(
                "GitHub",
                &[
                    ("GITHUB_TOKEN", self.settings.token.is_none()),
                    ("GITHUB_REPO", self.settings.repo.is_none()),
                ],
            );
        };

        let number = ticket.issue_number();
        self.api
            .probe(
                &self.issue_endpoint(repo, number),
                (AUTHORIZATION, format!("token {token}")),
                Some(self.browse_url(repo, number)),
            )
            .await
    }
}
