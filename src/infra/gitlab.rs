use async_trait::async_trait;
use reqwest::header::HeaderName;

use crate::config::GitLabSettings;
use crate::domain::ticket::TicketId;
use crate::infra::http::ApiClient;
use crate::infra::validator::skip_missing;
use crate::services::{IssueTrackerService, ValidationOutcome};

pub struct GitLabClient {
    api: ApiClient,
    settings: GitLabSettings,
}

impl GitLabClient {
    pub fn new(settings: GitLabSettings, api: ApiClient) -> Self {
        Self { api, settings }
    }

    /// Accepts a numeric project id or a `group/project` path.
    fn issue_endpoint(&self, project_id: &str, number: &str) -> String {
        format!(
            "{}/api/v4/projects/{}/issues/{}",
            self.settings.base_url.trim_end_matches('/'),
            project_id.trim_matches('/').replace('/', "%2F"),
            number
        )
    }

    fn browse_url(&self, project_id: &str, number: &str) -> Option<String> {
        let path = project_id.trim_matches('/');
        path.contains('/').then(|| {
            format!(
                "{}/{}/-/issues/{}",
                self.settings.base_url.trim_end_matches('/'),
                path,
                number
            )
        })
    }
}

#[async_trait]
impl IssueTrackerService for GitLabClient {
    fn platform(&self) -> &str {
        "gitlab"
    }

    async fn exists(&self, ticket: &TicketId) -> ValidationOutcome {
        let (Some(token), Some(project_id)) = (&self.settings.token, &self.settings.project_id)
        else {
            return skip_missing(
                "GitLab",
                &[
                    ("GITLAB_TOKEN", self.settings.token.is_none()),
                    ("GITLAB_PROJECT_ID", self.settings.project_id.is_none()),
                ],
            );
        };

        let number = ticket.issue_number();
        self.api
            .probe(
                &self.issue_endpoint(project_id, number),
                (HeaderName::from_static("private-token"), token.clone()),
                self.browse_url(project_id, number),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str, token: Option<&str>, project_id: Option<&str>) -> GitLabClient {
        GitLabClient::new(
            GitLabSettings {
                base_url: base_url.to_string(),
                token: token.map(str::to_string),
                project_id: project_id.map(str::to_string),
            },
            ApiClient::new(Duration::from_secs(5)).unwrap(),
        )
    }

    #[tokio::test]
    async fn sends_private_token_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/projects/1234/issues/17"))
            .and(header("private-token", "gl-secret"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let gitlab = client(&server.uri(), Some("gl-secret"), Some("1234"));
        let outcome = gitlab.exists(&TicketId::from_token("#17").unwrap()).await;
        assert_eq!(outcome, ValidationOutcome::Exists);
    }

    #[test]
    fn project_paths_are_encoded_and_browsable() {
        let gitlab = client("https://gitlab.example.com/", Some("t"), Some("group/app"));
        assert_eq!(
            gitlab.issue_endpoint("group/app", "5"),
            "https://gitlab.example.com/api/v4/projects/group%2Fapp/issues/5"
        );
        assert_eq!(
            gitlab.browse_url("group/app", "5").as_deref(),
            Some("https://gitlab.example.com/group/app/-/issues/5")
        );
        assert_eq!(gitlab.browse_url("1234", "5"), None);
    }

    #[tokio::test]
    async fn server_error_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let gitlab = client(&server.uri(), Some("gl-secret"), Some("1234"));
        let outcome = gitlab.exists(&TicketId::from_token("OPS-3").unwrap()).await;
        assert!(!outcome.passed());
    }

    #[tokio::test]
    async fn skips_without_project_id() {
        let gitlab = client("https://gitlab.com", Some("gl-secret"), None);
        let outcome = gitlab.exists(&TicketId::from_token("#1").unwrap()).await;
        assert!(matches!(
            outcome,
            ValidationOutcome::Skipped { ref reason } if reason.contains("GITLAB_PROJECT_ID")
                && !reason.contains("GITLAB_TOKEN")
        ));
    }
}
