use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::header::AUTHORIZATION;

use crate::config::AzureSettings;
use crate::domain::ticket::TicketId;
use crate::infra::http::ApiClient;
use crate::infra::validator::skip_missing;
use crate::services::{IssueTrackerService, ValidationOutcome};

const API_VERSION: &str = "6.0";

pub struct AzureClient {
    api: ApiClient,
    settings: AzureSettings,
}

impl AzureClient {
    pub fn new(settings: AzureSettings, api: ApiClient) -> Self {
        Self { api, settings }
    }

    /// Personal access tokens go in as the password of an empty user.
    fn auth_header(token: &str) -> String {
        let encoded = BASE64_STANDARD.encode(format!(":{token}"));
        format!("Basic {encoded}")
    }

    fn project_root(&self, org: &str, project: &str) -> String {
        format!(
            "{}/{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            org,
            project
        )
    }

    fn work_item_endpoint(&self, org: &str, project: &str, number: &str) -> String {
        format!(
            "{}/_apis/wit/workitems/{number}?api-version={API_VERSION}",
            self.project_root(org, project)
        )
    }

    fn browse_url(&self, org: &str, project: &str, number: &str) -> String {
        format!(
            "{}/_workitems/edit/{number}",
            self.project_root(org, project)
        )
    }
}

#[async_trait]
impl IssueTrackerService for AzureClient {
    fn platform(&self) -> &str {
        "azure"
    }

    async fn exists(&self, ticket: &TicketId) -> ValidationOutcome {
        let (Some(token), Some(org), Some(project)) = (
            &self.settings.token,
            &self.settings.org,
            &self.settings.project,
        ) else {
            return skip_missing(
                "Azure DevOps",
                &[
                    ("AZURE_TOKEN", self.settings.token.is_none()),
                    ("AZURE_ORG", self.settings.org.is_none()),
                    ("AZURE_PROJECT", self.settings.project.is_none()),
                ],
            );
        };

        let number = ticket.issue_number();
        self.api
            .probe(
                &self.work_item_endpoint(org, project, number),
                (AUTHORIZATION, Self::auth_header(token)),
                Some(self.browse_url(org, project, number)),
            )
            .await
    }
}
