use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(String),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Base URLs for each Google API; overridable so tests can point at a local server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub tasks: String,
    pub drive: String,
    pub chat: String,
    pub calendar: String,
    pub token_uri: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            tasks: "https://tasks.googleapis.com".to_string(),
            drive: "https://www.googleapis.com".to_string(),
            chat: "https://chat.googleapis.com".to_string(),
            calendar: "https://www.googleapis.com".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Routes every API, including the token exchange, to one base URL.
    pub fn single_host(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            tasks: base.clone(),
            drive: base.clone(),
            chat: base.clone(),
            calendar: base.clone(),
            token_uri: format!("{}/token", base),
        }
    }
}

#[derive(Clone, Debug)]
pub enum CredentialSource {
    ServiceAccount {
        client_email: String,
        private_key: String,
    },
    AccessToken(String),
}

#[derive(Clone, Debug)]
pub struct WorkspaceConfig {
    pub credentials: CredentialSource,
    pub delegated_user: String,
    pub port: u16,
    pub timeout_secs: u64,
    pub endpoints: ApiEndpoints,
}

impl WorkspaceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        crate::helpers::load_config(|key| std::env::var(key).ok())
    }
}
