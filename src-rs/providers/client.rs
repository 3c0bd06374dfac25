use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::types::ProviderError;
use crate::config::ApiEndpoints;

/// Authorized handle shared by every provider during one aggregation.
#[derive(Clone)]
pub struct WorkspaceClient {
    http: reqwest::Client,
    access_token: String,
    endpoints: Arc<ApiEndpoints>,
}

impl std::fmt::Debug for WorkspaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceClient")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl WorkspaceClient {
    pub fn new(http: reqwest::Client, access_token: impl Into<String>, endpoints: ApiEndpoints) -> Self {
        Self {
            http,
            access_token: access_token.into(),
            endpoints: Arc::new(endpoints),
        }
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        base_url: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), path);
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|err| ProviderError::Parse(err.to_string()))
    }
}

pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ProviderError::Api {
        status: status.as_u16(),
        message: api_error_message(&body),
    })
}

/// Google error bodies nest the human-readable text under `error.message`.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
