//! Identity-toolkit REST auth provider
//!
//! API Flow:
//! 1. Register: POST /accounts:signUp?key=.. → id token + local user id
//! 2. Login: POST /accounts:signInWithPassword?key=.. → same shape
//!
//! Sign-out is local: the held session is dropped.

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    models::Session,
    services::auth::{AuthErrorKind, AuthProvider},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    local_id: String,
    email: String,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Session {
            owner_id: response.local_id,
            email: response.email,
            id_token: response.id_token,
            refresh_token: response.refresh_token,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct IdentityToolkitAuth {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    session: RwLock<Option<Session>>,
}

impl IdentityToolkitAuth {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            session: RwLock::new(None),
        }
    }

    /// The session from the most recent successful register or login
    pub async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    async fn password_call(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthErrorKind> {
        let url = format!("{}/{}", self.api_url, endpoint);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, endpoint, "Auth request failed");
                AuthErrorKind::NetworkFailure
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let kind = parse_error_code(&body)
                .map(|code| AuthErrorKind::from_provider_code(&code))
                .unwrap_or(AuthErrorKind::Unknown);

            tracing::warn!(status = %status, kind = ?kind, endpoint, "Auth provider rejected request");
            return Err(kind);
        }

        let auth: AuthResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, endpoint, "Failed to parse auth response");
            AuthErrorKind::Unknown
        })?;

        let session = Session::from(auth);
        *self.session.write().await = Some(session.clone());

        tracing::info!(owner_id = %session.owner_id, endpoint, "Authenticated");
        Ok(session)
    }
}

fn parse_error_code(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

#[async_trait::async_trait]
impl AuthProvider for IdentityToolkitAuth {
    async fn register(&self, email: &str, password: &str) -> Result<Session, AuthErrorKind> {
        self.password_call("accounts:signUp", email, password).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthErrorKind> {
        self.password_call("accounts:signInWithPassword", email, password)
            .await
    }

    async fn logout(&self) -> Result<(), String> {
        let previous = self.session.write().await.take();
        if let Some(session) = previous {
            tracing::info!(owner_id = %session.owner_id, "Signed out");
        }
        Ok(())
    }
}
