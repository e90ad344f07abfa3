use std::io;

use thiserror::Error;

pub const EXAMPLE_BRANCH: &str = "feature/123-new-login (or feature/PROJ-123-new-login)";
pub const EXAMPLE_COMMIT: &str = "[#123]: describe the change (or [PROJ-123]: ...)";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid ticket pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("commit message is missing a valid ticket reference")]
    MissingTicket,
    #[error("no ticket reference found in '{0}'")]
    NoTicketFound(String),
    #[error("ticket {ticket} does not exist or could not be verified on {platform}")]
    TicketRejected {
        ticket: String,
        platform: String,
        url: Option<String>,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// Extra lines shown to the user below the error message.
    pub fn hints(&self) -> Vec<String> {
        match self {
            AppError::MissingTicket => vec![
                format!("Example branch name: {EXAMPLE_BRANCH}"),
                format!("Example commit message: {EXAMPLE_COMMIT}"),
            ],
            AppError::TicketRejected { url: Some(url), .. } => {
                vec![format!("Check whether the ticket exists: {url}")]
            }
            AppError::InvalidPattern { .. } => {
                vec!["Fix or remove the entry in TICKET_REGEX.".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ticket_hints_show_examples() {
        let hints = AppError::MissingTicket.hints();
        assert_eq!(hints.len(), 2);
        assert!(hints[0].contains("feature/123"));
        assert!(hints[1].contains("[PROJ-123]"));
    }

    #[test]
    fn rejected_ticket_hint_includes_url_when_known() {
        let error = AppError::TicketRejected {
            ticket: "[#7]".to_string(),
            platform: "github".to_string(),
            url: Some("https://github.com/acme/app/issues/7".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "ticket [#7] does not exist or could not be verified on github"
        );
        assert_eq!(
            error.hints(),
            vec!["Check whether the ticket exists: https://github.com/acme/app/issues/7"]
        );

        let without_url = AppError::TicketRejected {
            ticket: "[#7]".to_string(),
            platform: "github".to_string(),
            url: None,
        };
        assert!(without_url.hints().is_empty());
    }
}
