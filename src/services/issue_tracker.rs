use async_trait::async_trait;

use crate::domain::ticket::TicketId;

/// Result of checking a ticket against a tracking platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Exists,
    NotFound { status: u16, url: Option<String> },
    Unreachable { reason: String, url: Option<String> },
    /// Credentials are missing; the ticket was not checked.
    Skipped { reason: String },
}

impl ValidationOutcome {
    /// Skipped checks pass; a missing ticket and an unreachable platform do not.
    pub fn passed(&self) -> bool {
        matches!(
            self,
            ValidationOutcome::Exists | ValidationOutcome::Skipped { .. }
        )
    }

    pub fn browse_url(&self) -> Option<&str> {
        match self {
            ValidationOutcome::NotFound { url, .. } | ValidationOutcome::Unreachable { url, .. } => {
                url.as_deref()
            }
            _ => None,
        }
    }
}

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    fn platform(&self) -> &str;

    /// True when no platform is configured and every ticket is accepted unchecked.
    fn is_noop(&self) -> bool {
        false
    }

    async fn exists(&self, ticket: &TicketId) -> ValidationOutcome;
}
