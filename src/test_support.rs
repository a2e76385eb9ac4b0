//! In-memory stand-ins for the git and model services.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{AppConfig, ModelSettings};
use crate::context::AppContext;
use crate::credentials::CredentialResolver;
use crate::domain::diff::StagedDiff;
use crate::domain::summary::Summary;
use crate::error::{AppError, AppResult, SummaryError};
use crate::infra::debug_log::MemoryDebugLog;
use crate::infra::reporter::MemoryReporter;
use crate::services::{LanguageModelService, VersionControlService};

/// Context for commands that only talk to git.
pub fn vcs_context(workspace_root: &Path, vcs: Arc<FakeVcs>) -> AppContext {
    let config = AppConfig {
        workspace_root: workspace_root.to_path_buf(),
        model: ModelSettings::default(),
        diff_timeout: Duration::from_secs(5),
        debug_log_path: workspace_root.join("hook.log"),
    };
    AppContext::new(
        config,
        vcs,
        Arc::new(FakeModel::replying("chore: unused")),
        Arc::new(MemoryDebugLog::default()),
        Arc::new(MemoryReporter::default()),
        CredentialResolver::new("ai.apikey", "QUILL_TEST_CONTEXT_UNSET_KEY"),
    )
}

#[derive(Default)]
pub struct FakeVcs {
    pub diff: String,
    pub diff_fails: bool,
    pub modified_files: Vec<String>,
    pub config: Mutex<HashMap<String, String>>,
    pub config_fails: bool,
    pub hooks_dir: PathBuf,
    pub config_reads: AtomicUsize,
    pub diff_reads: AtomicUsize,
}

impl FakeVcs {
    pub fn with_diff(mut self, diff: &str) -> Self {
        self.diff = diff.to_string();
        self
    }

    pub fn with_config(self, key: &str, value: &str) -> Self {
        self.config
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_hooks_dir(mut self, dir: &Path) -> Self {
        self.hooks_dir = dir.to_path_buf();
        self
    }

    pub fn config_reads(&self) -> usize {
        self.config_reads.load(Ordering::SeqCst)
    }

    pub fn diff_reads(&self) -> usize {
        self.diff_reads.load(Ordering::SeqCst)
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.config.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl VersionControlService for FakeVcs {
    async fn staged_diff(&self) -> AppResult<Option<StagedDiff>> {
        self.diff_reads.fetch_add(1, Ordering::SeqCst);
        if self.diff_fails {
            return Err(AppError::VersionControl(
                "git diff --cached timed out after 5s".to_string(),
            ));
        }
        Ok(StagedDiff::from_output(self.diff.clone()))
    }

    async fn staged_modified_files(&self) -> AppResult<Vec<String>> {
        Ok(self.modified_files.clone())
    }

    async fn config_value(&self, key: &str) -> AppResult<Option<String>> {
        self.config_reads.fetch_add(1, Ordering::SeqCst);
        if self.config_fails {
            return Err(AppError::VersionControl("git config exited with 128".to_string()));
        }
        Ok(self.config.lock().unwrap().get(key).cloned())
    }

    async fn set_local_config(&self, key: &str, value: Option<&str>) -> AppResult<()> {
        let mut config = self.config.lock().unwrap();
        match value {
            Some(value) => config.insert(key.to_string(), value.to_string()),
            None => config.remove(key),
        };
        Ok(())
    }

    async fn hooks_directory(&self) -> AppResult<PathBuf> {
        Ok(self.hooks_dir.clone())
    }
}

pub enum FakeReply {
    Summary(&'static str),
    Fail(fn() -> SummaryError),
}

pub struct FakeModel {
    reply: FakeReply,
    calls: AtomicUsize,
    last_scope: Mutex<Option<String>>,
}

impl FakeModel {
    pub fn replying(text: &'static str) -> Self {
        Self::new(FakeReply::Summary(text))
    }

    pub fn failing(error: fn() -> SummaryError) -> Self {
        Self::new(FakeReply::Fail(error))
    }

    fn new(reply: FakeReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_scope: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_scope(&self) -> Option<String> {
        self.last_scope.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModelService for FakeModel {
    async fn summarize(
        &self,
        _diff: &StagedDiff,
        scope: Option<&str>,
        _api_key: &str,
    ) -> Result<Summary, SummaryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_scope.lock().unwrap() = scope.map(str::to_string);
        match &self.reply {
            FakeReply::Summary(text) => Summary::parse(text).ok_or(SummaryError::EmptySummary),
            FakeReply::Fail(make) => Err(make()),
        }
    }
}
