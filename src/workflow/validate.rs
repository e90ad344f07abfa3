use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::message::CommitMessage;
use crate::domain::ticket::TicketId;
use crate::error::{AppError, AppResult};
use crate::services::ValidationOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReport {
    Verified { ticket: TicketId, platform: String },
    Skipped { ticket: TicketId, reason: String },
    PlatformUnset { ticket: TicketId },
}

pub async fn validate_commit_message(
    ctx: &AppContext,
    message: &CommitMessage,
) -> AppResult<ValidationReport> {
    let Some(ticket) = ctx.patterns.resolve(&message.body()) else {
        info!("validation failed: no ticket reference in commit message");
        return Err(AppError::MissingTicket);
    };

    if ctx.config.platform.is_none() {
        info!(ticket = %ticket, "validation skipped: TICKET_PLATFORM not set");
        return Ok(ValidationReport::PlatformUnset { ticket });
    }

    let platform = ctx.issue_tracker.platform().to_string();
    debug!(ticket = %ticket, platform = %platform, "validating ticket");

    match ctx.issue_tracker.exists(&ticket).await {
        ValidationOutcome::Exists => {
            info!(ticket = %ticket, platform = %platform, "validation succeeded");
            Ok(ValidationReport::Verified { ticket, platform })
        }
        ValidationOutcome::Skipped { reason } => Ok(ValidationReport::Skipped { ticket, reason }),
        outcome => {
            info!(ticket = %ticket, platform = %platform, ?outcome, "validation failed");
            Err(AppError::TicketRejected {
                ticket: ticket.to_string(),
                platform,
                url: outcome.browse_url().map(str::to_string),
            })
        }
    }
}
