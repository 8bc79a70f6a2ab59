// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream clients and plan orchestration.

pub mod edamam;
pub mod gemini;
pub mod identity;
pub mod oauth;
pub mod plan;
pub mod playlists;
pub mod spotify;

pub use edamam::{EdamamClient, NutritionAnalyzer, NutritionError};
pub use gemini::{GeminiClient, TextGenerator};
pub use identity::{FirebaseAuthClient, IdentityError, IdentityProvider, IdentityRecord};
pub use plan::PlanOrchestrator;
pub use playlists::PlaylistProvider;
pub use spotify::{CatalogError, PlaylistSearch, SpotifyClient};
