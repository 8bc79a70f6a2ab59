// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use serde::Deserialize;

/// One line of an ingredient list, e.g. `"1 cup cooked rice"`.
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionIngredient {
    pub ingredient: String,
}
