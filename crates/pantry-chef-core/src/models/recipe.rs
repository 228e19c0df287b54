// ABOUTME: Recipe catalog rows and request-scoped scored recipe results
// ABOUTME: Defines Recipe and ScoredRecipe with their score invariants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::{ExperienceLevelId, LifestyleId, RecipeId};
use serde::{Deserialize, Serialize};

/// A recipe from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe id
    pub id: RecipeId,
    /// Display name
    pub name: String,
    /// Free-text ingredient description (not authoritative for matching)
    pub ingredients_text: String,
    /// Short description
    pub description: String,
    /// Preparation steps
    pub steps: String,
    /// Calories per serving
    pub calories: f64,
    /// Total preparation time in minutes
    pub minutes: i64,
    /// Lifestyle category the recipe belongs to
    pub lifestyle_id: LifestyleId,
    /// Skill tier required to cook it
    pub experience_level_id: ExperienceLevelId,
}

/// A recipe scored against the ingredients a user currently holds.
///
/// Created and discarded within a single recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecipe {
    /// The scored recipe
    pub recipe: Recipe,
    /// Weighted score in `[0, 1]`
    pub total_score: f64,
    /// Required ingredients the user holds
    pub matched_count: usize,
    /// Size of the recipe's required ingredient set
    pub total_ingredient_count: usize,
}

impl ScoredRecipe {
    /// Required ingredients the user does not hold
    #[must_use]
    pub const fn extras(&self) -> usize {
        self.total_ingredient_count.saturating_sub(self.matched_count)
    }
}
