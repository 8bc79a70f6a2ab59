// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Edamam Nutrition Analysis client.
//!
//! A passthrough: the ingredient list goes up, the upstream JSON text comes
//! back untouched (byte for byte, key order included).

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

const EDAMAM_API_URL: &str = "https://api.edamam.com";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Nutrition service errors.
#[derive(Debug, thiserror::Error)]
pub enum NutritionError {
    /// The request URL carries `app_key`, so it is never kept.
    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response is not valid JSON: {0}")]
    InvalidBody(String),
}

impl From<reqwest::Error> for NutritionError {
    fn from(e: reqwest::Error) -> Self {
        NutritionError::Transport(e.without_url())
    }
}

/// Nutrition facts for an ingredient list.
#[async_trait]
pub trait NutritionAnalyzer: Send + Sync {
    /// Upstream response body, checked to be JSON.
    async fn analyze(&self, ingredients: &[String]) -> Result<String, NutritionError>;
}

pub struct EdamamClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    app_key: String,
}

#[derive(Serialize)]
struct NutritionDetailsRequest<'a> {
    ingredients: &'a [String],
}

impl EdamamClient {
    pub fn new(app_id: String, app_key: String) -> Result<Self, NutritionError> {
        Self::with_base_url(EDAMAM_API_URL.to_string(), app_id, app_key)
    }

    pub fn with_base_url(
        base_url: String,
        app_id: String,
        app_key: String,
    ) -> Result<Self, NutritionError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id,
            app_key,
        })
    }
}

#[async_trait]
impl NutritionAnalyzer for EdamamClient {
    async fn analyze(&self, ingredients: &[String]) -> Result<String, NutritionError> {
        let response = self
            .http
            .post(format!("{}/api/nutrition-details", self.base_url))
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
            ])
            .json(&NutritionDetailsRequest { ingredients })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NutritionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<serde::de::IgnoredAny>(&text)
            .map_err(|e| NutritionError::InvalidBody(e.to_string()))?;
        Ok(text)
    }
}
