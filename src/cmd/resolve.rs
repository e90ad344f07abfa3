use serde::Serialize;

use crate::context::AppContext;
use crate::domain::ticket::TicketId;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct ResolveCommandArgs {
    pub text: Option<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ResolvedTicket<'a> {
    ticket: &'a TicketId,
    kind: &'static str,
    project: Option<&'a str>,
    issue_number: &'a str,
    input: &'a str,
}

/// Without text the current branch name is resolved.
pub async fn run(ctx: &AppContext, args: ResolveCommandArgs) -> AppResult<String> {
    let input = match args.text {
        Some(text) => text,
        None => ctx.version_control.current_branch().await?.0,
    };

    let ticket = ctx
        .patterns
        .resolve(&input)
        .ok_or_else(|| AppError::NoTicketFound(input.clone()))?;

    if !args.json {
        return Ok(ticket.to_string());
    }

    let resolved = ResolvedTicket {
        ticket: &ticket,
        kind: ticket.kind(),
        project: ticket.project_code(),
        issue_number: ticket.issue_number(),
        input: &input,
    };
    serde_json::to_string(&resolved)
        .map_err(|err| AppError::Configuration(format!("failed to encode ticket: {err}")))
}
