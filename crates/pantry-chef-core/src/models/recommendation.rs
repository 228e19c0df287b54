// ABOUTME: Persisted recommendation history rows and their history-listing view
// ABOUTME: History is append-only and drives the never-repeat rule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::{Recipe, RecipeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recipe suggested to one user at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Recipient
    pub user_id: UserId,
    /// Suggested recipe
    pub recipe_id: RecipeId,
    /// When it was suggested
    pub timestamp: DateTime<Utc>,
}

impl Recommendation {
    /// Build a history row stamped with the current time
    #[must_use]
    pub fn now(user_id: UserId, recipe_id: RecipeId) -> Self {
        Self {
            user_id,
            recipe_id,
            timestamp: Utc::now(),
        }
    }
}

/// A history row joined with its recipe, for listing a user's past suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedRecipe {
    /// The recipe that was suggested
    pub recipe: Recipe,
    /// When it was suggested
    pub recommended_at: DateTime<Utc>,
}
