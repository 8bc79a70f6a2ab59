// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition analysis passthrough.

use crate::error::{AppError, Result};
use crate::middleware::JsonBody;
use crate::models::NutritionIngredient;
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use std::sync::Arc;

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Nutrition analysis service not configured. Check EDAMAM_APP_ID and EDAMAM_APP_KEY.";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/analyze_nutrition", post(analyze_nutrition))
}

/// Forward the ingredient strings and return the upstream JSON unchanged.
async fn analyze_nutrition(
    State(state): State<Arc<AppState>>,
    JsonBody(items): JsonBody<Vec<NutritionIngredient>>,
) -> Result<Response> {
    let analyzer = state
        .nutrition
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable(NOT_CONFIGURED_MESSAGE.to_string()))?;

    let ingredients: Vec<String> = items.into_iter().map(|item| item.ingredient).collect();

    let body = analyzer.analyze(&ingredients).await.map_err(|e| {
        AppError::Upstream(format!("Failed to fetch nutrition data from Edamam: {}", e))
    })?;

    tracing::debug!(count = ingredients.len(), "Nutrition analysis returned");

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
