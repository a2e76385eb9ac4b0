use std::io::{self, BufRead, Write};

use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::credentials::{Credential, mask_secret};
use crate::error::AppResult;
use crate::services::VersionControlService;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Store the API key in this repository's git config.
    Init,
    /// Show the effective configuration (secrets masked).
    Show,
}

pub async fn run(ctx: &AppContext, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(ctx).await,
        ConfigCommand::Show => run_show(ctx).await,
    }
}

async fn run_init(ctx: &AppContext) -> AppResult<()> {
    let key = ctx.credentials.config_key();
    let current = ctx.version_control.config_value(key).await?;

    println!("Configuring quill for this repository.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("The key is stored in .git/config, which is never committed.");
    println!();

    let action = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        prompt(
            &mut input,
            &mut io::stdout(),
            "Anthropic API key",
            current.is_some(),
        )?
    };

    match apply_action(ctx.version_control.as_ref(), key, action).await? {
        PromptAction::Keep => println!("API key unchanged."),
        PromptAction::Clear => println!("Removed {key} from git config."),
        PromptAction::Set(_) => println!("Saved API key to git config {key}."),
    }
    Ok(())
}

async fn run_show(ctx: &AppContext) -> AppResult<()> {
    let credential = ctx.credentials.resolve(ctx.version_control.as_ref()).await;
    let key_line = describe_credential(
        credential,
        ctx.credentials.config_key(),
        ctx.credentials.env_var(),
    );

    for (label, value) in describe_config(&ctx.config) {
        println!("{label}: {value}");
    }
    println!("API key: {key_line}");
    Ok(())
}

fn describe_config(config: &AppConfig) -> Vec<(&'static str, String)> {
    vec![
        ("Workspace", config.workspace_root.display().to_string()),
        ("Model", config.model.model.clone()),
        ("Endpoint", config.model.endpoint.clone()),
        ("Request timeout", format!("{}s", config.model.timeout.as_secs())),
        ("Diff timeout", format!("{}s", config.diff_timeout.as_secs())),
        ("Debug log", config.debug_log_path.display().to_string()),
    ]
}

fn describe_credential(credential: Option<&Credential>, config_key: &str, env_var: &str) -> String {
    match credential {
        Some(credential) => format!("{} (from {})", mask_secret(&credential.value), credential.source),
        None => format!("<not set> (checked git config {config_key}, then ${env_var})"),
    }
}

async fn apply_action(
    vcs: &dyn VersionControlService,
    key: &str,
    action: PromptAction,
) -> AppResult<PromptAction> {
    match &action {
        PromptAction::Keep => {}
        PromptAction::Clear => vcs.set_local_config(key, None).await?,
        PromptAction::Set(value) => vcs.set_local_config(key, Some(value)).await?,
    }
    Ok(action)
}

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    field: &str,
    has_current: bool,
) -> AppResult<PromptAction> {
    // The stored value is a secret; only say that one exists.
    if has_current {
        write!(output, "{field} [****] (Enter to keep, '-' to clear): ")?;
    } else {
        write!(output, "{field} (Enter to skip): ")?;
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
