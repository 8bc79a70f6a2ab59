// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness plan orchestration.
//!
//! One request produces:
//! 1. A workout plan and a diet plan from the text generator (concurrently)
//! 2. Playlist suggestions (degrading to an error marker)
//! 3. One appended plan record under `users/{uid}/plans`

use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::{PlanRecord, PlanRequest};
use crate::services::gemini::TextGenerator;
use crate::services::playlists::PlaylistProvider;
use crate::time_utils::now_rfc3339;
use anyhow::Context;
use std::sync::Arc;

pub const GENERATOR_UNAVAILABLE_MESSAGE: &str =
    "AI model (Gemini) is not initialized. Please check GEMINI_API_KEY.";

/// Builds, stores and returns generated plans.
pub struct PlanOrchestrator {
    generator: Option<Arc<dyn TextGenerator>>,
    playlists: PlaylistProvider,
    store: Arc<dyn UserStore>,
}

impl PlanOrchestrator {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        playlists: PlaylistProvider,
        store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            generator,
            playlists,
            store,
        }
    }

    /// False when no text generator was configured at startup.
    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Generate and persist a plan for `request.user_uid`.
    ///
    /// The record is written only after both generations and the playlist
    /// step have completed, so a failure leaves nothing behind.
    pub async fn generate(&self, request: &PlanRequest) -> Result<PlanRecord> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable(GENERATOR_UNAVAILABLE_MESSAGE.to_string()))?;

        let workout_prompt = workout_prompt(request);
        let diet_prompt = diet_prompt(request);

        let (workout_plan, diet_plan) = tokio::try_join!(
            async {
                generator
                    .generate(&workout_prompt)
                    .await
                    .context("workout plan generation failed")
            },
            async {
                generator
                    .generate(&diet_prompt)
                    .await
                    .context("diet plan generation failed")
            },
        )?;

        let suggestions = self
            .playlists
            .suggest(&request.music_genre, request.intensity())
            .await;

        let record = PlanRecord::new(
            request,
            workout_plan,
            diet_plan,
            suggestions,
            now_rfc3339(),
        );

        self.store.add_plan(&request.user_uid, &record).await?;

        tracing::info!(
            uid = %request.user_uid,
            duration_weeks = request.duration_weeks,
            playlists = record.music_playlist_suggestions.len(),
            "Plan generated and stored"
        );

        Ok(record)
    }
}

/// Weights keep their decimal point (65.0 stays "65.0").
fn kg(weight: f64) -> String {
    format!("{:?}", weight)
}

fn workout_prompt(request: &PlanRequest) -> String {
    format!(
        "You are an expert fitness coach. Create a detailed 1-week workout plan for a user \
aiming to go from {current} kg to {target} kg in {weeks} weeks.
The plan should include both cardio and strength training.
For each exercise, provide:
- Exercise Name
- A very brief description (1 sentence)
- Sets and Reps (e.g., 3 sets of 10-12 reps)
- A short instruction on how to perform it safely.
Include rest days. Also, specifically suggest 3 variations or progressions for glute bridge exercises.
Format the plan clearly, day by day, using Markdown headings for readability.",
        current = kg(request.current_weight),
        target = kg(request.target_weight),
        weeks = request.duration_weeks,
    )
}

fn diet_prompt(request: &PlanRequest) -> String {
    format!(
        "You are an expert nutritionist. Based on a user's goal to go from {current} kg to \
{target} kg in {weeks} weeks,
provide a general overview of recommended daily caloric intake and a balanced macronutrient \
breakdown (proteins, carbs, fats).
Then, suggest a 3-day sample meal plan, including Breakfast, Lunch, Dinner, and 2 Snacks per day.
For each meal, suggest specific healthy options.
Include advice on water intake and general healthy eating habits.
Format the diet plan clearly, day by day, using Markdown headings for readability.",
        current = kg(request.current_weight),
        target = kg(request.target_weight),
        weeks = request.duration_weeks,
    )
}
