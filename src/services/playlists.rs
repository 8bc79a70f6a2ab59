// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Optional playlist suggestions for a generated plan.
//!
//! Playlist lookup never fails a plan: an unconfigured catalog or a failed
//! search turns into a single error marker in the suggestion list.

use crate::models::PlaylistSuggestion;
use crate::services::spotify::PlaylistSearch;
use std::sync::Arc;

/// Maximum playlists returned per plan.
pub const MAX_PLAYLISTS: u32 = 5;

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Spotify API not initialized. Check server logs for credential errors.";

/// Music catalog capability, checked once at startup.
#[derive(Clone)]
pub enum PlaylistProvider {
    Configured(Arc<dyn PlaylistSearch>),
    Unconfigured,
}

impl PlaylistProvider {
    /// Reported in the startup log.
    pub fn is_configured(&self) -> bool {
        matches!(self, PlaylistProvider::Configured(_))
    }

    /// Search query for a genre and workout intensity.
    pub fn query(genre: &str, intensity: &str) -> String {
        format!("{} {} workout music", genre, intensity)
    }

    /// Up to [`MAX_PLAYLISTS`] suggestions, or exactly one error marker.
    pub async fn suggest(&self, genre: &str, intensity: &str) -> Vec<PlaylistSuggestion> {
        let search = match self {
            PlaylistProvider::Configured(search) => search,
            PlaylistProvider::Unconfigured => {
                return vec![PlaylistSuggestion::error(NOT_CONFIGURED_MESSAGE)];
            }
        };

        let query = Self::query(genre, intensity);

        match search.search_playlists(&query, MAX_PLAYLISTS).await {
            Ok(playlists) => playlists
                .into_iter()
                .take(MAX_PLAYLISTS as usize)
                .map(PlaylistSuggestion::Playlist)
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, query = %query, "Spotify search failed, returning error marker");
                vec![PlaylistSuggestion::error(format!(
                    "Spotify API error: {}. Check credentials or network.",
                    e
                ))]
            }
        }
    }
}
