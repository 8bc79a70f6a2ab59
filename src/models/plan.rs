// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness plan request and stored plan record.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub const DEFAULT_WORKOUT_INTENSITY: &str = "moderate";
pub const NO_DESCRIPTION: &str = "No description available";

/// Body of `POST /generate_plan`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlanRequest {
    /// Identity-service uid that owns the plan
    #[validate(length(min = 1, message = "must not be empty"))]
    pub user_uid: String,
    /// Current weight in kg
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub current_weight: f64,
    /// Target weight in kg
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub target_weight: f64,
    #[validate(range(min = 1, max = 52, message = "must be between 1 and 52"))]
    pub duration_weeks: i64,
    pub music_genre: String,
    /// Falls back to "moderate" when absent or null
    #[serde(default)]
    pub workout_intensity: Option<String>,
}

impl PlanRequest {
    pub fn intensity(&self) -> &str {
        self.workout_intensity
            .as_deref()
            .unwrap_or(DEFAULT_WORKOUT_INTENSITY)
    }
}

/// A playlist returned by the music catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlaylistInfo {
    pub name: String,
    pub description: String,
    pub spotify_url: String,
    pub image_url: Option<String>,
    pub owner: Option<String>,
    pub tracks_count: u64,
}

/// One entry of the playlist list: a playlist, or a marker explaining why
/// there are none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(untagged)]
pub enum PlaylistSuggestion {
    Playlist(PlaylistInfo),
    Error { error: String },
}

impl PlaylistSuggestion {
    pub fn error(message: impl Into<String>) -> Self {
        PlaylistSuggestion::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PlaylistSuggestion::Error { .. })
    }
}

/// Generated plan stored under `users/{uid}/plans/{auto-id}`.
///
/// Append-only: every successful generation writes a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanRecord {
    pub current_weight: f64,
    pub target_weight: f64,
    pub duration_weeks: i64,
    pub music_genre: String,
    pub workout_intensity: String,
    pub workout_plan: String,
    pub diet_general_info: String,
    pub music_playlist_suggestions: Vec<PlaylistSuggestion>,
    /// Server-assigned creation time (RFC3339)
    pub generated_at: String,
}

impl PlanRecord {
    pub fn new(
        request: &PlanRequest,
        workout_plan: String,
        diet_general_info: String,
        music_playlist_suggestions: Vec<PlaylistSuggestion>,
        generated_at: String,
    ) -> Self {
        Self {
            current_weight: request.current_weight,
            target_weight: request.target_weight,
            duration_weeks: request.duration_weeks,
            music_genre: request.music_genre.clone(),
            workout_intensity: request.intensity().to_string(),
            workout_plan,
            diet_general_info,
            music_playlist_suggestions,
            generated_at,
        }
    }
}
