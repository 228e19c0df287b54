// ABOUTME: Top-N selector ranking accumulated recipes by score
// ABOUTME: De-duplicates by recipe id keeping the best score and first scan position
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use pantry_chef_core::models::{RecipeId, ScoredRecipe};
use std::collections::HashMap;

/// Best `limit` distinct recipes, highest score first.
///
/// Equal scores keep the order in which recipes were first accepted.
#[must_use]
pub fn select_top(scored: Vec<ScoredRecipe>, limit: usize) -> Vec<ScoredRecipe> {
    let mut best: Vec<ScoredRecipe> = Vec::with_capacity(scored.len());
    let mut positions: HashMap<RecipeId, usize> = HashMap::new();

    for candidate in scored {
        match positions.get(&candidate.recipe.id) {
            Some(&position) => {
                if let Some(existing) = best.get_mut(position) {
                    if candidate.total_score > existing.total_score {
                        *existing = candidate;
                    }
                }
            }
            None => {
                positions.insert(candidate.recipe.id, best.len());
                best.push(candidate);
            }
        }
    }

    // Stable sort keeps first-seen order among ties
    best.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    best.truncate(limit);
    best
}
