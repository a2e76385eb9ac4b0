use std::sync::Arc;

use crate::config::AppConfig;
use crate::credentials::CredentialResolver;
use crate::services::{DebugLog, LanguageModelService, Reporter, VersionControlService};

pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub language_model: Arc<dyn LanguageModelService>,
    pub debug_log: Arc<dyn DebugLog>,
    pub reporter: Arc<dyn Reporter>,
    pub credentials: CredentialResolver,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        language_model: Arc<dyn LanguageModelService>,
        debug_log: Arc<dyn DebugLog>,
        reporter: Arc<dyn Reporter>,
        credentials: CredentialResolver,
    ) -> Self {
        Self {
            config,
            version_control,
            language_model,
            debug_log,
            reporter,
            credentials,
        }
    }
}
