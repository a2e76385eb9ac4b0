use std::io;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("language model error: {0}")]
    LanguageModel(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures of the single summary request. None of these abort the hook on
/// their own; the workflow reports them and carries on without a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Transport(String),
    #[error(
        "your Anthropic credit balance is too low. Add credits under Plans & Billing at https://console.anthropic.com/settings/billing"
    )]
    InsufficientCredit,
    #[error("API responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("unexpected response: {0}")]
    MalformedResponse(String),
    #[error("model returned an empty summary")]
    EmptySummary,
}
