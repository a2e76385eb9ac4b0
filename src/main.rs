mod cmd;
mod config;
mod context;
mod credentials;
mod domain;
mod error;
mod infra;
mod services;
#[cfg(test)]
mod test_support;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::{hook, install};
use crate::config::{API_KEY_CONFIG_KEY, API_KEY_ENV_VAR, AppConfig};
use crate::context::AppContext;
use crate::credentials::CredentialResolver;
use crate::error::{AppError, AppResult};
use crate::infra::anthropic::AnthropicClient;
use crate::infra::debug_log::FileDebugLog;
use crate::infra::git::GitCli;
use crate::infra::reporter::StreamReporter;
use crate::workflow::prepare::HookArgs;

const LOG_FILTER_ENV_VAR: &str = "QUILL_LOG";

#[derive(Parser)]
#[command(
    name = "quill",
    author,
    version,
    about = "Drafts a conventional commit message from the staged diff",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    hook: HookCliArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the API key and inspect settings.
    Config(ConfigArgs),
    /// Install quill as this repository's prepare-commit-msg hook.
    Install,
}

/// Arguments git passes to the prepare-commit-msg hook.
#[derive(Args)]
struct HookCliArgs {
    /// Path to the commit message file.
    #[arg(required = true)]
    commit_msg_file: Option<PathBuf>,
    /// Where the message came from (message, template, merge, squash, commit).
    source: Option<String>,
    /// Commit being amended, when SOURCE is commit.
    sha: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(&cwd)?;
    let context = build_context(config)?;

    match cli.command {
        Some(Commands::Config(args)) => config_cmd::run(&context, args.command).await,
        Some(Commands::Install) => install::run(&context).await,
        None => {
            let commit_msg_file = cli.hook.commit_msg_file.ok_or_else(|| {
                AppError::Configuration("missing commit message file argument".to_string())
            })?;
            let args = HookArgs {
                commit_msg_file,
                source: cli.hook.source,
                sha: cli.hook.sha,
            };
            hook::run(&context, args).await?;
            Ok(())
        }
    }
}

fn build_context(config: AppConfig) -> AppResult<AppContext> {
    let git = Arc::new(GitCli::new(
        config.workspace_root.clone(),
        config.diff_timeout,
    ));
    let language_model = Arc::new(AnthropicClient::new(config.model.clone())?);
    let debug_log = Arc::new(FileDebugLog::new(config.debug_log_path.clone()));
    let reporter = Arc::new(StreamReporter::stderr());
    let credentials = CredentialResolver::new(API_KEY_CONFIG_KEY, API_KEY_ENV_VAR);

    Ok(AppContext::new(
        config,
        git,
        language_model,
        debug_log,
        reporter,
        credentials,
    ))
}
