use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::domain::branch::BranchName;
use crate::domain::message::CommitMessage;
use crate::domain::ticket::TicketId;

/// Commit sources whose message git generates itself.
const GENERATED_SOURCES: &[&str] = &["merge", "squash"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareOutcome {
    Injected {
        ticket: TicketId,
        message: CommitMessage,
    },
    AlreadyTagged(TicketId),
    NoBranchTicket(Option<BranchName>),
    GeneratedMessage(String),
}

/// Never fails: a missing branch ticket or an unreadable branch leaves the
/// message alone.
pub async fn prepare_commit_message(
    ctx: &AppContext,
    message: &CommitMessage,
    source: Option<&str>,
    branch_override: Option<BranchName>,
) -> PrepareOutcome {
    if let Some(source) = source.filter(|source| GENERATED_SOURCES.contains(source)) {
        debug!(source, "leaving generated commit message untouched");
        return PrepareOutcome::GeneratedMessage(source.to_string());
    }

    if let Some(existing) = ctx.patterns.resolve(&message.body()) {
        debug!(ticket = %existing, "commit message already references a ticket");
        return PrepareOutcome::AlreadyTagged(existing);
    }

    let branch = match branch_override {
        Some(branch) => branch,
        None => match ctx.version_control.current_branch().await {
            Ok(branch) => branch,
            Err(err) => {
                warn!(error = %err, "could not determine the current branch");
                return PrepareOutcome::NoBranchTicket(None);
            }
        },
    };

    if branch.is_detached() {
        debug!("HEAD is detached; no branch to take a ticket from");
        return PrepareOutcome::NoBranchTicket(None);
    }

    let Some(ticket) = ctx.patterns.resolve(branch.as_str()) else {
        debug!(branch = branch.as_str(), "no ticket reference in branch name");
        return PrepareOutcome::NoBranchTicket(Some(branch));
    };

    info!(ticket = %ticket, branch = branch.as_str(), "adding ticket to commit message");
    PrepareOutcome::Injected {
        message: message.with_ticket(&ticket),
        ticket,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::config::AppConfig;
    use crate::domain::pattern::PatternSet;
    use crate::error::{AppError, AppResult};
    use crate::infra::validator::TicketValidator;
    use crate::services::VersionControlService;

    struct FixedBranch(Option<&'static str>);

    #[async_trait]
    impl VersionControlService for FixedBranch {
        async fn current_branch(&self) -> AppResult<BranchName> {
            self.0
                .map(BranchName::new)
                .ok_or_else(|| AppError::VersionControl("not a git repository".to_string()))
        }
    }

    fn context(branch: Option<&'static str>) -> AppContext {
        AppContext::new(
            AppConfig::from_lookup(Path::new("/repo"), |_| None).unwrap(),
            PatternSet::builtin(),
            Arc::new(FixedBranch(branch)),
            Arc::new(TicketValidator::Noop),
        )
    }

    #[tokio::test]
    async fn injects_ticket_from_branch() {
        let ctx = context(Some("feature/PROJ-42-login"));
        let outcome =
            prepare_commit_message(&ctx, &CommitMessage::new("implement feature"), None, None)
                .await;

        let PrepareOutcome::Injected { ticket, message } = outcome else {
            panic!("expected injection, got {outcome:?}");
        };
        assert_eq!(ticket.to_string(), "[PROJ-42]");
        assert_eq!(message.as_str(), "[PROJ-42]: implement feature");
    }

    #[tokio::test]
    async fn leaves_tagged_message_unchanged() {
        let ctx = context(Some("feature/PROJ-42-login"));
        let outcome = prepare_commit_message(
            &ctx,
            &CommitMessage::new("[PROJ-42]: implement feature"),
            Some("message"),
            None,
        )
        .await;
        assert_eq!(
            outcome,
            PrepareOutcome::AlreadyTagged(TicketId::from_token("PROJ-42").unwrap())
        );
    }

    #[tokio::test]
    async fn branch_override_skips_git() {
        let ctx = context(None);
        let outcome = prepare_commit_message(
            &ctx,
            &CommitMessage::new("fix crash"),
            None,
            Some(BranchName::new("bugfix/311-null-check")),
        )
        .await;
        assert!(matches!(
            outcome,
            PrepareOutcome::Injected { ref message, .. } if message.as_str() == "[#311]: fix crash"
        ));
    }

    #[tokio::test]
    async fn branch_without_ticket_is_not_an_error() {
        let ctx = context(Some("main"));
        let outcome =
            prepare_commit_message(&ctx, &CommitMessage::new("tidy up"), None, None).await;
        assert_eq!(
            outcome,
            PrepareOutcome::NoBranchTicket(Some(BranchName::new("main")))
        );
    }

    #[tokio::test]
    async fn git_failure_is_not_an_error() {
        let ctx = context(None);
        let outcome =
            prepare_commit_message(&ctx, &CommitMessage::new("tidy up"), None, None).await;
        assert_eq!(outcome, PrepareOutcome::NoBranchTicket(None));
    }

    #[tokio::test]
    async fn merge_messages_are_left_alone() {
        let ctx = context(Some("feature/PROJ-42-login"));
        let outcome = prepare_commit_message(
            &ctx,
            &CommitMessage::new("Merge branch 'main'"),
            Some("merge"),
            None,
        )
        .await;
        assert_eq!(outcome, PrepareOutcome::GeneratedMessage("merge".to_string()));
    }
}
