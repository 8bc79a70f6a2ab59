// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitz: AI fitness plan and workout music backend
//!
//! Registers users against Firebase Authentication, generates workout and
//! diet plans with Gemini, suggests Spotify playlists for the workout and
//! stores every generated plan in Firestore. Also proxies Edamam nutrition
//! analysis for the frontend.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::UserStore;
use services::{IdentityProvider, NutritionAnalyzer, PlanOrchestrator};
use std::sync::Arc;

/// Shared application state.
///
/// Upstreams sit behind traits so tests can swap in fakes.
pub struct AppState {
    pub config: Config,
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn UserStore>,
    pub planner: PlanOrchestrator,
    /// `None` when Edamam credentials are missing.
    pub nutrition: Option<Arc<dyn NutritionAnalyzer>>,
}
