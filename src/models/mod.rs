// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod nutrition;
pub mod plan;
pub mod user;

pub use nutrition::NutritionIngredient;
pub use plan::{PlanRecord, PlanRequest, PlaylistInfo, PlaylistSuggestion};
pub use user::UserProfile;
