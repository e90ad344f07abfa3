use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::context::AppContext;
use crate::domain::message::CommitMessage;
use crate::error::AppResult;
use crate::workflow::validate::{ValidationReport, validate_commit_message};

#[derive(Debug, Clone)]
pub struct ValidateCommandArgs {
    pub commit_file: PathBuf,
}

pub async fn run(ctx: &AppContext, args: ValidateCommandArgs) -> AppResult<ValidationReport> {
    let message = CommitMessage::new(fs::read_to_string(&args.commit_file)?);

    if let Some(platform) = &ctx.config.platform {
        if ctx.issue_tracker.is_noop() {
            eprintln!(
                "Warning: ticket platform '{platform}' is not supported (expected gitlab, github or azure); skipping ticket validation."
            );
        }
    }

    let report = validate_commit_message(ctx, &message).await?;

    match &report {
        ValidationReport::PlatformUnset { ticket } => {
            eprintln!(
                "Warning: validation of ticket {ticket} skipped because TICKET_PLATFORM is not set."
            );
            eprintln!(
                "Setting it is optional, but recommended to catch references to tickets that do not exist."
            );
            eprintln!("Run `ticket-hooks config show` to inspect the current configuration.");
        }
        ValidationReport::Skipped { ticket, reason } => {
            eprintln!("Warning: {reason}; ticket {ticket} was not checked.");
        }
        ValidationReport::Verified { ticket, platform } => {
            debug!(ticket = %ticket, platform = %platform, "ticket verified");
        }
    }

    Ok(report)
}
