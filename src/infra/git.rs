use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use crate::domain::diff::StagedDiff;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
    timeout: Duration,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf, timeout: Duration) -> Self {
        Self {
            workspace_root,
            timeout,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new("git");
        command.args(args).current_dir(&self.workspace_root);
        command
    }

    async fn run(&self, args: &[&str]) -> AppResult<Output> {
        let label = format!("git {}", args.join(" "));
        run_with_timeout(self.command(args), self.timeout, &label).await
    }

    /// Runs git and insists on a zero exit status.
    async fn run_checked(&self, args: &[&str]) -> AppResult<String> {
        let output = self.run(args).await?;
        if !output.status.success() {
            return Err(exit_error(&format!("git {}", args.join(" ")), &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn staged_diff(&self) -> AppResult<Option<StagedDiff>> {
        let diff = self
            .run_checked(&["diff", "--cached", "--no-color", "--no-ext-diff"])
            .await?;
        Ok(StagedDiff::from_output(diff))
    }

    async fn staged_modified_files(&self) -> AppResult<Vec<String>> {
        let names = self
            .run_checked(&["diff", "--cached", "--name-only", "--diff-filter=M"])
            .await?;
        Ok(names
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn config_value(&self, key: &str) -> AppResult<Option<String>> {
        let output = self.run(&["config", "--get", key]).await?;
        // Exit status 1 means the key is not set.
        if output.status.code() == Some(1) {
            return Ok(None);
        }
        if !output.status.success() {
            return Err(exit_error(&format!("git config --get {key}"), &output));
        }
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(value).filter(|value| !value.is_empty()))
    }

    async fn set_local_config(&self, key: &str, value: Option<&str>) -> AppResult<()> {
        match value {
            Some(value) => {
                self.run_checked(&["config", "--local", key, value]).await?;
            }
            None => {
                let output = self.run(&["config", "--local", "--unset", key]).await?;
                // Exit status 5 means there was nothing to unset.
                if !output.status.success() && output.status.code() != Some(5) {
                    return Err(exit_error(&format!("git config --unset {key}"), &output));
                }
            }
        }
        Ok(())
    }

    async fn hooks_directory(&self) -> AppResult<PathBuf> {
        let path = self.run_checked(&["rev-parse", "--git-path", "hooks"]).await?;
        let path = PathBuf::from(path.trim());
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.workspace_root.join(path))
        }
    }
}

async fn run_with_timeout(
    mut command: Command,
    limit: Duration,
    label: &str,
) -> AppResult<Output> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    timeout(limit, command.output())
        .await
        .map_err(|_| {
            AppError::VersionControl(format!(
                "{label} timed out after {}s",
                limit.as_secs_f32()
            ))
        })?
        .map_err(|err| AppError::VersionControl(format!("failed to run {label}: {err}")))
}

fn exit_error(label: &str, output: &Output) -> AppError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let code = output
        .status
        .code()
        .map_or("signal".to_string(), |code| code.to_string());
    AppError::VersionControl(format!("{label} exited with {code}: {}", stderr.trim()))
}
