use std::env;
use std::fmt;

use tokio::sync::OnceCell;
use tracing::warn;

use crate::services::VersionControlService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    RepositoryConfig,
    Environment,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::RepositoryConfig => write!(f, "git config"),
            CredentialSource::Environment => write!(f, "environment"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub value: String,
    pub source: CredentialSource,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &mask_secret(&self.value))
            .field("source", &self.source)
            .finish()
    }
}

/// Looks the API key up once, git config first, then the environment, and
/// hands back the same answer for the rest of the process.
pub struct CredentialResolver {
    config_key: String,
    env_var: String,
    resolved: OnceCell<Option<Credential>>,
}

impl CredentialResolver {
    pub fn new(config_key: impl Into<String>, env_var: impl Into<String>) -> Self {
        Self {
            config_key: config_key.into(),
            env_var: env_var.into(),
            resolved: OnceCell::new(),
        }
    }

    pub fn config_key(&self) -> &str {
        &self.config_key
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub async fn resolve(&self, vcs: &dyn VersionControlService) -> Option<&Credential> {
        self.resolved
            .get_or_init(|| self.lookup(vcs))
            .await
            .as_ref()
    }

    async fn lookup(&self, vcs: &dyn VersionControlService) -> Option<Credential> {
        let configured = match vcs.config_value(&self.config_key).await {
            Ok(value) => value,
            Err(err) => {
                warn!("could not read {}: {err}", self.config_key);
                None
            }
        };
        if let Some(value) = configured.filter(|value| !value.trim().is_empty()) {
            return Some(Credential {
                value: value.trim().to_string(),
                source: CredentialSource::RepositoryConfig,
            });
        }

        env::var(&self.env_var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(|value| Credential {
                value,
                source: CredentialSource::Environment,
            })
    }
}

/// Keeps the first and last three characters of long secrets.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    match chars.len() {
        0 => "<not set>".to_string(),
        len if len > 6 => {
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[len - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        _ => "***".to_string(),
    }
}
