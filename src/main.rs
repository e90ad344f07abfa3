mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod services;
mod workflow;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::prepare::{self, PrepareCommandArgs};
use crate::cmd::resolve::{self, ResolveCommandArgs};
use crate::cmd::validate::{self, ValidateCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::pattern::PatternSet;
use crate::error::{AppError, AppResult};
use crate::infra::git::GitCli;
use crate::infra::http::ApiClient;
use crate::infra::validator::TicketValidator;
use crate::workflow::prepare::PrepareOutcome;

#[derive(Parser)]
#[command(
    name = "ticket-hooks",
    author,
    version,
    about = "Git hooks that keep issue-tracker ticket references in commit messages"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// prepare-commit-msg hook: prefix the message with the branch's ticket.
    Prepare(PrepareArgs),
    /// commit-msg hook: require a ticket reference and check that it exists.
    Validate(ValidateArgs),
    /// Print the ticket reference found in TEXT, or in the current branch name.
    Resolve(ResolveArgs),
    /// Inspect the hook configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct PrepareArgs {
    /// Path to the commit message file.
    commit_file: PathBuf,
    /// Commit source passed by git (message, template, merge, squash, commit).
    source: Option<String>,
    /// Commit SHA passed by git when amending.
    sha: Option<String>,
    /// Use this branch name instead of asking git.
    #[arg(long)]
    branch: Option<String>,
}

#[derive(Args)]
struct ValidateArgs {
    /// Path to the commit message file.
    commit_file: PathBuf,
}

#[derive(Args)]
struct ResolveArgs {
    text: Option<String>,
    /// Print the ticket as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(error) => {
            report(&error, None);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config);

    let debug_log = config.debug_log.clone();
    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::info!(%error, "command failed");
            report(&error, debug_log.as_deref());
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> AppResult<AppConfig> {
    let cwd = std::env::current_dir()?;
    AppConfig::load(&cwd)
}

fn report(error: &AppError, debug_log: Option<&Path>) {
    eprintln!("Error: {error}");
    for hint in error.hints() {
        eprintln!("{hint}");
    }
    if let Some(path) = debug_log {
        eprintln!("See the debug log for details: {}", path.display());
    }
}

async fn run(command: Commands, config: AppConfig) -> AppResult<()> {
    match command {
        Commands::Config(args) => {
            config_cmd::run(&config, args.command);
            Ok(())
        }
        Commands::Prepare(args) => run_prepare(&build_context(config)?, args).await,
        Commands::Validate(args) => run_validate(&build_context(config)?, args).await,
        Commands::Resolve(args) => run_resolve(&build_context(config)?, args).await,
    }
}

async fn run_prepare(context: &AppContext, args: PrepareArgs) -> AppResult<()> {
    tracing::debug!(file = %args.commit_file.display(), sha = ?args.sha, "prepare-commit-msg");
    let outcome = prepare::run(
        context,
        PrepareCommandArgs {
            commit_file: args.commit_file,
            source: args.source,
            branch: args.branch,
        },
    )
    .await?;

    match outcome {
        PrepareOutcome::Injected { ticket, .. } => {
            println!("Added ticket {ticket} to the commit message.");
        }
        PrepareOutcome::AlreadyTagged(ticket) => {
            tracing::debug!(ticket = %ticket, "commit message left unchanged");
        }
        PrepareOutcome::NoBranchTicket(branch) => {
            tracing::debug!(branch = ?branch.as_ref().map(|b| b.as_str()), "no ticket to add");
        }
        PrepareOutcome::GeneratedMessage(source) => {
            tracing::debug!(%source, "git generated the commit message");
        }
    }
    Ok(())
}

async fn run_validate(context: &AppContext, args: ValidateArgs) -> AppResult<()> {
    tracing::debug!(file = %args.commit_file.display(), "commit-msg");
    validate::run(
        context,
        ValidateCommandArgs {
            commit_file: args.commit_file,
        },
    )
    .await?;
    Ok(())
}

async fn run_resolve(context: &AppContext, args: ResolveArgs) -> AppResult<()> {
    let output = resolve::run(
        context,
        ResolveCommandArgs {
            text: args.text,
            json: args.json,
        },
    )
    .await?;
    println!("{output}");
    Ok(())
}

fn build_context(config: AppConfig) -> AppResult<AppContext> {
    let patterns = PatternSet::from_config(&config.ticket_patterns)?;
    let api = ApiClient::new(config.api_timeout)?;
    let validator = match &config.platform {
        Some(platform) => TicketValidator::select(platform, &config, api),
        None => TicketValidator::Noop,
    };
    let git = Arc::new(GitCli::new(config.workspace_root.clone()));

    Ok(AppContext::new(config, patterns, git, Arc::new(validator)))
}
