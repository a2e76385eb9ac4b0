use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::error::AppResult;

pub const API_KEY_CONFIG_KEY: &str = "ai.apikey";
pub const API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
const DEFAULT_API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 100;
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_TOP_P: f32 = 0.8;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DIFF_TIMEOUT_SECS: u64 = 5;
const DEFAULT_DEBUG_LOG: &str = "/tmp/git-hook-debug.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub workspace_root: PathBuf,
    pub model: ModelSettings,
    pub diff_timeout: Duration,
    pub debug_log_path: PathBuf,
}

/// Everything the summary client needs to shape its one request.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub endpoint: String,
    pub model: String,
    pub api_version: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub timeout: Duration,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn load(workspace_hint: &Path) -> AppResult<Self> {
        let mut model = ModelSettings::default();
        if let Some(name) = non_empty_var("QUILL_MODEL") {
            model.model = name;
        }
        if let Some(endpoint) = non_empty_var("QUILL_API_URL") {
            model.endpoint = endpoint;
        }
        model.timeout = seconds_var("QUILL_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);

        let debug_log_path = non_empty_var("QUILL_DEBUG_LOG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEBUG_LOG));

        Ok(Self {
            workspace_root: workspace_hint.to_path_buf(),
            model,
            diff_timeout: seconds_var("QUILL_DIFF_TIMEOUT_SECS", DEFAULT_DIFF_TIMEOUT_SECS),
            debug_log_path,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn seconds_var(name: &str, default: u64) -> Duration {
    match non_empty_var(name) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!("Invalid {name} value '{raw}', using default {default}s");
                Duration::from_secs(default)
            }
        },
        None => Duration::from_secs(default),
    }
}
