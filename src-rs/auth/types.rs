use async_trait::async_trait;
use thiserror::Error;

use crate::providers::WorkspaceClient;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to sign token request: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token exchange rejected ({status}): {message}")]
    TokenExchange { status: u16, message: String },

    #[error("invalid token response: {0}")]
    Parse(String),
}

/// Produces the authorized client every provider shares for one aggregation.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn authorized_client(&self) -> Result<WorkspaceClient, AuthError>;
}
