use async_trait::async_trait;

use crate::domain::diff::StagedDiff;
use crate::domain::summary::Summary;
use crate::error::SummaryError;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn summarize(
        &self,
        diff: &StagedDiff,
        scope: Option<&str>,
        api_key: &str,
    ) -> Result<Summary, SummaryError>;
}
