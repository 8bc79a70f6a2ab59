// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The Firebase service-account file is the only hard requirement. The
//! Gemini, Spotify and Edamam credentials are optional: a missing pair
//! disables the feature that needs it and is reported at startup.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the Firebase service-account JSON file
    pub firebase_credentials_path: PathBuf,
    /// Project and identity named by the service-account file
    pub service_account: ServiceAccountKey,
    /// Edamam Nutrition Analysis credentials
    pub edamam: Option<EdamamCredentials>,
    /// Google Gemini settings
    pub gemini: Option<GeminiSettings>,
    /// Spotify client-credentials pair
    pub spotify: Option<SpotifyCredentials>,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct EdamamCredentials {
    pub app_id: String,
    pub app_key: String,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// The parts of the service-account key file this service reads itself.
///
/// Token minting reads the same file through gcloud-sdk.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub client_email: String,
}

impl ServiceAccountKey {
    /// Parse a service-account key from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidCredentials(e.to_string()))
    }

    /// Read and parse a service-account key file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::CredentialsNotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidCredentials(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `.env` is read if present, then the file named by `FITZ_ENV_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        if let Some(path) = non_empty_var("FITZ_ENV_FILE") {
            dotenvy::from_path(path).ok();
        }

        let firebase_credentials_path = non_empty_var("FIREBASE_PRIVATE_KEY_PATH")
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("FIREBASE_PRIVATE_KEY_PATH"))?;
        let service_account = ServiceAccountKey::from_file(&firebase_credentials_path)?;

        let edamam = var_pair("EDAMAM_APP_ID", "EDAMAM_APP_KEY")
            .map(|(app_id, app_key)| EdamamCredentials { app_id, app_key });

        let gemini = non_empty_var("GEMINI_API_KEY").map(|api_key| GeminiSettings {
            api_key,
            model: non_empty_var("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        });

        let spotify = var_pair("SPOTIPY_CLIENT_ID", "SPOTIPY_CLIENT_SECRET").map(
            |(client_id, client_secret)| SpotifyCredentials {
                client_id,
                client_secret,
            },
        );

        Ok(Self {
            firebase_credentials_path,
            service_account,
            edamam,
            gemini,
            spotify,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
        })
    }

    /// Log a warning for every optional integration that is not configured.
    pub fn warn_missing_optional(&self) {
        if self.edamam.is_none() {
            tracing::warn!(
                "Edamam API keys (EDAMAM_APP_ID, EDAMAM_APP_KEY) are missing. Nutrition analysis is disabled."
            );
        }
        if self.gemini.is_none() {
            tracing::warn!(
                "Google Gemini API key (GEMINI_API_KEY) is missing. Plan generation is disabled."
            );
        }
        if self.spotify.is_none() {
            tracing::warn!(
                "Spotify API keys (SPOTIPY_CLIENT_ID, SPOTIPY_CLIENT_SECRET) are missing. Playlist search is disabled."
            );
        }
    }

    /// Config for tests: every integration configured with dummy values.
    pub fn test_default() -> Self {
        Self {
            firebase_credentials_path: PathBuf::from("tests/fixtures/service-account.json"),
            service_account: ServiceAccountKey {
                project_id: "fitz-test".to_string(),
                client_email: "fitz-api@fitz-test.iam.gserviceaccount.com".to_string(),
            },
            edamam: Some(EdamamCredentials {
                app_id: "test_app_id".to_string(),
                app_key: "test_app_key".to_string(),
            }),
            gemini: Some(GeminiSettings {
                api_key: "test_gemini_key".to_string(),
                model: DEFAULT_GEMINI_MODEL.to_string(),
            }),
            spotify: Some(SpotifyCredentials {
                client_id: "test_client_id".to_string(),
                client_secret: "test_client_secret".to_string(),
            }),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8000,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Both variables must be set for the pair to count.
fn var_pair(first: &str, second: &str) -> Option<(String, String)> {
    Some((non_empty_var(first)?, non_empty_var(second)?))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Firebase private key file not found at: {}", .0.display())]
    CredentialsNotFound(PathBuf),

    #[error("Invalid Firebase service-account file: {0}")]
    InvalidCredentials(String),
}
