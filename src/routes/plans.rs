// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan generation and plan history routes.

use crate::error::Result;
use crate::middleware::ValidatedJson;
use crate::models::{PlanRecord, PlanRequest, PlaylistSuggestion};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DEFAULT_HISTORY_LIMIT: u32 = 10;
const MAX_HISTORY_LIMIT: u32 = 50;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate_plan", post(generate_plan))
        .route("/users/{user_uid}/plans", get(list_plans))
}

// ─── Plan Generation ─────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GeneratePlanResponse {
    pub message: String,
    pub workout_plan: String,
    pub diet_plan_summary: String,
    pub music_playlist_suggestions: Vec<PlaylistSuggestion>,
}

/// Generate a workout plan, diet plan and playlists, and store them.
async fn generate_plan(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<PlanRequest>,
) -> Result<Json<GeneratePlanResponse>> {
    let record = state.planner.generate(&request).await?;

    Ok(Json(GeneratePlanResponse {
        message: "Plan generated and saved successfully".to_string(),
        workout_plan: record.workout_plan,
        diet_plan_summary: record.diet_general_info,
        music_playlist_suggestions: record.music_playlist_suggestions,
    }))
}

// ─── Plan History ────────────────────────────────────────────

#[derive(Deserialize)]
struct HistoryQuery {
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_HISTORY_LIMIT
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanHistoryResponse {
    pub plans: Vec<PlanRecord>,
}

/// List a user's stored plans, newest first.
async fn list_plans(
    State(state): State<Arc<AppState>>,
    Path(user_uid): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<PlanHistoryResponse>> {
    let limit = params.limit.clamp(1, MAX_HISTORY_LIMIT);
    let plans = state.store.list_plans(&user_uid, limit).await?;

    Ok(Json(PlanHistoryResponse { plans }))
}
