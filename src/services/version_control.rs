use async_trait::async_trait;

use crate::domain::diff::StagedDiff;
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Staged changes, or `None` when nothing is staged.
    async fn staged_diff(&self) -> AppResult<Option<StagedDiff>>;
    /// Staged paths that modify an existing file.
    async fn staged_modified_files(&self) -> AppResult<Vec<String>>;
    async fn config_value(&self, key: &str) -> AppResult<Option<String>>;
    async fn set_local_config(&self, key: &str, value: Option<&str>) -> AppResult<()>;
    async fn hooks_directory(&self) -> AppResult<std::path::PathBuf>;
}
