use std::fs;
use std::io;
use std::path::PathBuf;

use crate::context::AppContext;
use crate::domain::diff::default_scope;
use crate::domain::message::{has_existing_message, prepend_summary};
use crate::domain::summary::Summary;
use crate::error::{AppError, AppResult, SummaryError};

/// Arguments git passes to a `prepare-commit-msg` hook.
#[derive(Debug, Clone)]
pub struct HookArgs {
    pub commit_msg_file: PathBuf,
    pub source: Option<String>,
    pub sha: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ExistingMessage,
    MissingCredential,
    EmptyDiff,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Skipped(SkipReason),
    Written(Summary),
}

pub async fn prepare_commit_message(ctx: &AppContext, args: &HookArgs) -> AppResult<HookOutcome> {
    let log = ctx.debug_log.as_ref();
    let path = &args.commit_msg_file;
    log.record(&format!(
        "prepare-commit-msg: file={} source={} sha={}",
        path.display(),
        args.source.as_deref().unwrap_or("-"),
        args.sha.as_deref().unwrap_or("-"),
    ));

    let original = fs::read_to_string(path).map_err(|err| {
        log.record(&format!("failed to read {}: {err}", path.display()));
        AppError::Io(io::Error::new(
            err.kind(),
            format!("failed to read {}: {err}", path.display()),
        ))
    })?;
    if has_existing_message(&original) {
        log.record("commit message already present; leaving it alone");
        return Ok(HookOutcome::Skipped(SkipReason::ExistingMessage));
    }

    let vcs = ctx.version_control.as_ref();
    let Some(credential) = ctx.credentials.resolve(vcs).await else {
        log.record(&format!(
            "no API key in git config {} or ${}; skipping",
            ctx.credentials.config_key(),
            ctx.credentials.env_var(),
        ));
        return Ok(HookOutcome::Skipped(SkipReason::MissingCredential));
    };
    log.record(&format!("using API key from {}", credential.source));

    let diff = vcs.staged_diff().await.inspect_err(|err| {
        log.record(&format!("could not read staged diff: {err}"));
    })?;
    let Some(diff) = diff else {
        log.record("staged diff is empty; skipping");
        return Ok(HookOutcome::Skipped(SkipReason::EmptyDiff));
    };
    log.record(&format!("staged diff: {} bytes", diff.as_str().len()));

    let scope = match vcs.staged_modified_files().await {
        Ok(files) => default_scope(&files),
        Err(err) => {
            log.record(&format!("scope detection failed: {err}"));
            None
        }
    };

    log.record(&format!("requesting summary from {}", ctx.config.model.model));
    let summary = match ctx
        .language_model
        .summarize(&diff, scope.as_deref(), &credential.value)
        .await
    {
        Ok(summary) => {
            log.record(&format!("summary: {}", summary.header()));
            Some(summary)
        }
        Err(err) => {
            let warning = diagnostic(&err);
            ctx.reporter.warn(&warning);
            log.record(&format!("summary request failed: {warning}"));
            None
        }
    };

    let Some(summary) = summary else {
        return Err(AppError::LanguageModel(
            "no commit message was generated; commit again and write one yourself".to_string(),
        ));
    };

    // Re-read so anything written since the first read is kept.
    let current = fs::read_to_string(path)?;
    fs::write(path, prepend_summary(&summary, &current)).inspect_err(|err| {
        log.record(&format!("failed to write {}: {err}", path.display()));
    })?;
    log.record("summary written to commit message file");

    Ok(HookOutcome::Written(summary))
}

/// One-line explanation shown on stderr when the summary request fails.
pub fn diagnostic(err: &SummaryError) -> String {
    match err {
        SummaryError::InsufficientCredit => err.to_string(),
        other => format!("could not generate a commit message ({other})"),
    }
}
