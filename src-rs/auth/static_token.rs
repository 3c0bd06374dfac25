use async_trait::async_trait;

use super::types::{AuthError, CredentialProvider};
use crate::config::ApiEndpoints;
use crate::providers::WorkspaceClient;

/// Wraps an access token minted elsewhere (gcloud, a sidecar, a test fixture).
pub struct StaticTokenCredentials {
    http: reqwest::Client,
    access_token: String,
    endpoints: ApiEndpoints,
}

impl StaticTokenCredentials {
    pub fn new(http: reqwest::Client, access_token: String, endpoints: ApiEndpoints) -> Self {
        Self {
            http,
            access_token,
            endpoints,
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenCredentials {
    async fn authorized_client(&self) -> Result<WorkspaceClient, AuthError> {
        Ok(WorkspaceClient::new(
            self.http.clone(),
            self.access_token.clone(),
            self.endpoints.clone(),
        ))
    }
}
