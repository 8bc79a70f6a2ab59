// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer-token caching shared by the OAuth-backed clients.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

/// Margin before token expiration when we proactively refresh (5 minutes).
const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Access token with expiry information.
#[derive(Clone)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Build from an OAuth `expires_in` (seconds from now).
    pub fn from_expires_in(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            expires_at: Utc::now() + Duration::seconds(expires_in),
        }
    }

    /// Still usable with the refresh margin applied.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Single-slot token cache.
///
/// The write lock is held across the refresh so concurrent requests wait for
/// one fetch instead of each hitting the token endpoint.
#[derive(Default)]
pub struct TokenCache {
    slot: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, or run `fetch` and cache its result.
    pub async fn get_or_refresh<F, Fut, E>(&self, fetch: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<CachedToken, E>>,
    {
        // Fast path - no I/O
        if let Some(token) = self.slot.read().await.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let mut slot = self.slot.write().await;

        // Another task may have refreshed while we were waiting
        if let Some(token) = slot.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let token = fetch().await?;
        let access_token = token.access_token.clone();
        *slot = Some(token);
        Ok(access_token)
    }
}
