// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase Authentication admin client (Identity Toolkit REST API).
//!
//! Handles:
//! - Account creation with email/password
//! - Account lookup by email
//! - Mapping Identity Toolkit error codes (e.g. `EMAIL_EXISTS`) to typed errors

use anyhow::Context;
use async_trait::async_trait;
use gcloud_sdk::{GoogleAuthTokenGenerator, TokenSourceType};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
/// Authorization header the Auth emulator accepts for admin calls.
const EMULATOR_AUTHORIZATION: &str = "Bearer owner";

/// Scopes needed to manage Firebase Auth users.
pub const IDENTITY_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/identitytoolkit",
    "https://www.googleapis.com/auth/cloud-platform",
];

/// An identity record as returned by the identity service.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityRecord {
    pub uid: String,
    pub email: Option<String>,
}

/// Identity service errors.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Email already registered")]
    EmailExists,

    #[error("No user record found for the given identifier")]
    UserNotFound,

    /// Any other error code returned by the service.
    #[error("{0}")]
    Rejected(String),

    #[error("Identity service request failed: {0}")]
    Transport(String),
}

/// Account management on the identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_user(&self, email: &str, password: &str)
        -> Result<IdentityRecord, IdentityError>;

    async fn get_user_by_email(&self, email: &str) -> Result<IdentityRecord, IdentityError>;
}

enum Credentials {
    /// OAuth tokens minted from the service-account key (cached by gcloud-sdk)
    ServiceAccount(Arc<GoogleAuthTokenGenerator>),
    Emulator,
}

/// Identity Toolkit client scoped to one Firebase project.
pub struct FirebaseAuthClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    credentials: Credentials,
}

impl FirebaseAuthClient {
    /// Production client authenticated with the service-account key file.
    pub async fn from_credentials_file(
        project_id: impl Into<String>,
        credentials_path: &Path,
    ) -> anyhow::Result<Self> {
        let scopes = IDENTITY_SCOPES.iter().map(|s| s.to_string()).collect();
        let tokens = GoogleAuthTokenGenerator::new(
            TokenSourceType::File(credentials_path.to_path_buf()),
            scopes,
        )
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("failed loading credentials from {}", credentials_path.display()))?;

        Self::with_token_generator(IDENTITY_TOOLKIT_URL, project_id, Arc::new(tokens))
    }

    /// Client for `base_url` authenticated by `tokens`.
    pub fn with_token_generator(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        tokens: Arc<GoogleAuthTokenGenerator>,
    ) -> anyhow::Result<Self> {
        Self::build(
            base_url.into(),
            project_id.into(),
            Credentials::ServiceAccount(tokens),
        )
    }

    /// Client for the Firebase Auth emulator at `base_url`.
    ///
    /// For a `FIREBASE_AUTH_EMULATOR_HOST` of `host:port` the base URL is
    /// `http://host:port/identitytoolkit.googleapis.com`.
    pub fn emulator(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
    ) -> anyhow::Result<Self> {
        Self::build(base_url.into(), project_id.into(), Credentials::Emulator)
    }

    fn build(
        base_url: String,
        project_id: String,
        credentials: Credentials,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id,
            credentials,
        })
    }

    async fn authorization(&self) -> Result<String, IdentityError> {
        match &self.credentials {
            Credentials::ServiceAccount(tokens) => tokens
                .create_token()
                .await
                .map(|token| token.header_value())
                .map_err(|e| IdentityError::Transport(format!("access token: {}", e))),
            Credentials::Emulator => Ok(EMULATOR_AUTHORIZATION.to_string()),
        }
    }

    /// POST a JSON body to a project-scoped accounts endpoint.
    async fn post<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, IdentityError> {
        let url = format!(
            "{}/v1/projects/{}/{}",
            self.base_url, self.project_id, endpoint
        );
        let authorization = self.authorization().await?;

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, authorization)
            .json(body)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_body(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| IdentityError::Transport(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityRecord, IdentityError> {
        let created: AccountRecord = self
            .post("accounts", &SignUpRequest { email, password })
            .await?;

        tracing::info!(uid = %created.local_id, "Identity record created");
        Ok(created.into())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<IdentityRecord, IdentityError> {
        let lookup: LookupResponse = self
            .post("accounts:lookup", &LookupRequest { email: [email] })
            .await?;

        lookup
            .users
            .into_iter()
            .next()
            .map(IdentityRecord::from)
            .ok_or(IdentityError::UserNotFound)
    }
}

/// Map an Identity Toolkit error body to an [`IdentityError`].
///
/// The service reports a machine-readable code as the leading token of
/// `error.message`, e.g. `"EMAIL_EXISTS"` or
/// `"WEAK_PASSWORD : Password should be at least 6 characters"`.
fn parse_error_body(status: reqwest::StatusCode, body: &str) -> IdentityError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message);

    let Some(message) = message else {
        return IdentityError::Rejected(format!("HTTP {}: {}", status, body));
    };

    let code = message
        .split(|c: char| c == ':' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    match code {
        "EMAIL_EXISTS" | "DUPLICATE_EMAIL" => IdentityError::EmailExists,
        "USER_NOT_FOUND" | "EMAIL_NOT_FOUND" => IdentityError::UserNotFound,
        _ => IdentityError::Rejected(message),
    }
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LookupRequest<'a> {
    email: [&'a str; 1],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<AccountRecord> for IdentityRecord {
    fn from(record: AccountRecord) -> Self {
        Self {
            uid: record.local_id,
            email: record.email,
        }
    }
}

#[derive(Deserialize)]
struct LookupResponse {
    /// Absent when nothing matched
    #[serde(default)]
    users: Vec<AccountRecord>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}
