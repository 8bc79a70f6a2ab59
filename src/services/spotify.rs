// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify Web API client for playlist search.
//!
//! Handles:
//! - App-only access tokens (client-credentials flow), cached until expiry
//! - Playlist keyword search
//! - Rate limit detection

use crate::models::plan::{PlaylistInfo, NO_DESCRIPTION};
use crate::services::oauth::{CachedToken, TokenCache};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const SPOTIFY_API_URL: &str = "https://api.spotify.com";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Music catalog errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("rate limit exceeded (HTTP 429)")]
    RateLimited,

    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Keyword search over curated playlists.
#[async_trait]
pub trait PlaylistSearch: Send + Sync {
    async fn search_playlists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PlaylistInfo>, CatalogError>;
}

/// Spotify client using the client-credentials flow.
pub struct SpotifyClient {
    http: reqwest::Client,
    accounts_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    token_cache: TokenCache,
}

impl SpotifyClient {
    pub fn new(client_id: String, client_secret: String) -> Result<Self, CatalogError> {
        Self::with_base_urls(
            SPOTIFY_ACCOUNTS_URL.to_string(),
            SPOTIFY_API_URL.to_string(),
            client_id,
            client_secret,
        )
    }

    pub fn with_base_urls(
        accounts_url: String,
        api_url: String,
        client_id: String,
        client_secret: String,
    ) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            accounts_url: accounts_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            token_cache: TokenCache::new(),
        })
    }

    async fn access_token(&self) -> Result<String, CatalogError> {
        self.token_cache
            .get_or_refresh(|| self.request_token())
            .await
    }

    /// Exchange the client credentials for an app access token.
    async fn request_token(&self) -> Result<CachedToken, CatalogError> {
        let response = self
            .http
            .post(format!("{}/api/token", self.accounts_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: TokenResponse = check_response_json(response).await?;
        tracing::debug!(expires_in = token.expires_in, "Spotify access token obtained");

        Ok(CachedToken::from_expires_in(
            token.access_token,
            token.expires_in,
        ))
    }
}

#[async_trait]
impl PlaylistSearch for SpotifyClient {
    async fn search_playlists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PlaylistInfo>, CatalogError> {
        let access_token = self.access_token().await?;

        let response = self
            .http
            .get(format!("{}/v1/search", self.api_url))
            .bearer_auth(access_token)
            .query(&[
                ("q", query.to_string()),
                ("type", "playlist".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        let results: SearchResponse = check_response_json(response).await?;

        let page = results
            .playlists
            .ok_or_else(|| CatalogError::Malformed("missing 'playlists' object".to_string()))?;

        // Spotify pads the item list with nulls for playlists it can't return
        Ok(page
            .items
            .into_iter()
            .flatten()
            .take(limit as usize)
            .map(PlaylistInfo::from)
            .collect())
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, CatalogError> {
    let status = response.status();

    if status.as_u16() == 429 {
        tracing::warn!("Spotify rate limit hit (429)");
        return Err(CatalogError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CatalogError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| CatalogError::Malformed(e.to_string()))
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize)]
struct SearchResponse {
    playlists: Option<PlaylistPage>,
}

#[derive(Deserialize)]
struct PlaylistPage {
    #[serde(default)]
    items: Vec<Option<SpotifyPlaylist>>,
}

#[derive(Deserialize)]
struct SpotifyPlaylist {
    name: String,
    #[serde(default)]
    description: Option<String>,
    external_urls: ExternalUrls,
    #[serde(default)]
    images: Option<Vec<Image>>,
    owner: Owner,
    tracks: Tracks,
}

#[derive(Deserialize)]
struct ExternalUrls {
    spotify: String,
}

#[derive(Deserialize)]
struct Image {
    url: String,
}

#[derive(Deserialize)]
struct Owner {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct Tracks {
    total: u64,
}

impl From<SpotifyPlaylist> for PlaylistInfo {
    fn from(playlist: SpotifyPlaylist) -> Self {
        Self {
            name: playlist.name,
            description: playlist
                .description
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            spotify_url: playlist.external_urls.spotify,
            image_url: playlist
                .images
                .and_then(|images| images.into_iter().next())
                .map(|image| image.url),
            owner: playlist.owner.display_name,
            tracks_count: playlist.tracks.total,
        }
    }
}
