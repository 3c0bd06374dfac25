use async_trait::async_trait;
use thiserror::Error;

use super::client::WorkspaceClient;
use crate::task::WorkspaceTask;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network_error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api_error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse_error: {0}")]
    Parse(String),
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            ProviderError::Http(err) => err.status().map(|s| s.as_u16()),
            ProviderError::Parse(_) => None,
        }
    }
}

/// One external source normalized into [`WorkspaceTask`]s.
///
/// A fetch either returns every task it could collect or fails as a whole;
/// failures of nested per-item requests are absorbed by the implementation.
#[async_trait]
pub trait TaskProvider: Send + Sync {
    async fn fetch(
        &self,
        client: &WorkspaceClient,
        user_email: &str,
    ) -> Result<Vec<WorkspaceTask>, ProviderError>;
}
