use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use super::types::{AuthError, CredentialProvider};
use crate::config::ApiEndpoints;
use crate::providers::WorkspaceClient;

pub const SCOPES: [&str; 4] = [
    "https://www.googleapis.com/auth/tasks.readonly",
    "https://www.googleapis.com/auth/drive.readonly",
    "https://www.googleapis.com/auth/chat.tasks.readonly",
    "https://www.googleapis.com/auth/calendar.readonly",
];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    sub: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Domain-wide delegation: the service account acts as `delegated_user`.
pub struct ServiceAccountCredentials {
    http: reqwest::Client,
    client_email: String,
    private_key: String,
    delegated_user: String,
    endpoints: ApiEndpoints,
}

impl ServiceAccountCredentials {
    pub fn new(
        http: reqwest::Client,
        client_email: String,
        private_key: String,
        delegated_user: String,
        endpoints: ApiEndpoints,
    ) -> Self {
        Self {
            http,
            client_email,
            private_key,
            delegated_user,
            endpoints,
        }
    }

    fn claims(&self, issued_at: i64) -> AssertionClaims<'_> {
        AssertionClaims {
            iss: &self.client_email,
            scope: SCOPES.join(" "),
            aud: &self.endpoints.token_uri,
            sub: &self.delegated_user,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }

    fn signed_assertion(&self, issued_at: i64) -> Result<String, AuthError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        let token = encode(&Header::new(Algorithm::RS256), &self.claims(issued_at), &key)?;
        Ok(token)
    }

    async fn exchange(&self, assertion: &str) -> Result<String, AuthError> {
        let resp = self
            .http
            .post(&self.endpoints.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(AuthError::TokenExchange {
                status: status.as_u16(),
                message: body.trim().to_string(),
            });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|err| AuthError::Parse(err.to_string()))?;
        parsed
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::Parse("missing access_token".to_string()))
    }
}

#[async_trait]
impl CredentialProvider for ServiceAccountCredentials {
    async fn authorized_client(&self) -> Result<WorkspaceClient, AuthError> {
        let assertion = self.signed_assertion(Utc::now().timestamp())?;
        let access_token = self.exchange(&assertion).await?;
        tracing::debug!(subject = %self.delegated_user, "obtained delegated access token");
        Ok(WorkspaceClient::new(
            self.http.clone(),
            access_token,
            self.endpoints.clone(),
        ))
    }
}
