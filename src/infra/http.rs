use std::time::Duration;

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, HeaderName},
};
use tracing::{debug, error};

use crate::error::{AppError, AppResult};
use crate::services::ValidationOutcome;

const USER_AGENT: &str = concat!("ticket-hooks/", env!("CARGO_PKG_VERSION"));
const BODY_PREVIEW_LEN: usize = 200;

/// Shared HTTP client for single, unretried issue lookups.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
}

impl ApiClient {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| AppError::IssueTracker(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { http })
    }

    /// Only `200 OK` counts as an existing ticket.
    pub async fn probe(
        &self,
        url: &str,
        auth: (HeaderName, String),
        browse_url: Option<String>,
    ) -> ValidationOutcome {
        debug!(%url, "API GET");
        let (header, value) = auth;

        let response = match self
            .http
            .get(url)
            .header(header, value)
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(%url, error = %err, "API request failed");
                return ValidationOutcome::Unreachable {
                    reason: err.to_string(),
                    url: browse_url,
                };
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response>".to_string());
        let preview: String = body.chars().take(BODY_PREVIEW_LEN).collect();
        debug!(status = status.as_u16(), body = %preview, "API response");

        if status == StatusCode::OK {
            ValidationOutcome::Exists
        } else {
            ValidationOutcome::NotFound {
                status: status.as_u16(),
                url: browse_url,
            }
        }
    }
}
