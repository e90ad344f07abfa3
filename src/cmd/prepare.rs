use std::fs;
use std::path::PathBuf;

use crate::context::AppContext;
use crate::domain::branch::BranchName;
use crate::domain::message::CommitMessage;
use crate::error::AppResult;
use crate::workflow::prepare::{PrepareOutcome, prepare_commit_message};

#[derive(Debug, Clone)]
pub struct PrepareCommandArgs {
    pub commit_file: PathBuf,
    pub source: Option<String>,
    pub branch: Option<String>,
}

pub async fn run(ctx: &AppContext, args: PrepareCommandArgs) -> AppResult<PrepareOutcome> {
    let message = CommitMessage::new(fs::read_to_string(&args.commit_file)?);

    let outcome = prepare_commit_message(
        ctx,
        &message,
        args.source.as_deref(),
        args.branch.map(BranchName::new),
    )
    .await;

    if let PrepareOutcome::Injected { message, .. } = &outcome {
        fs::write(&args.commit_file, message.as_str())?;
    }

    Ok(outcome)
}
