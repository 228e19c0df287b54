// ABOUTME: Iterative widening search controller bounded by the request deadline
// ABOUTME: Rescans candidates with a growing extras tolerance until enough recipes are found
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! # Widening Search
//!
//! Requiring recipes to use only held ingredients rarely yields anything for
//! a small pantry, so each round tolerates one more missing ingredient
//! ("extras") than the last. Every candidate costs one ingredient lookup per
//! round, and every lookup is bounded by the [`SearchDeadline`].
//!
//! A round stops the search when it leaves at least `target_count` distinct
//! recipes accumulated. Running out of rounds is also a complete search. The
//! deadline passing at any point makes the result partial.

use super::deadline::SearchDeadline;
use super::pantry::Pantry;
use super::scoring::score_recipe;
use crate::config::RecommendationConfig;
use crate::database::repositories::RecipeRepository;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use pantry_chef_core::models::{Recipe, RecipeId, ScoredRecipe};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Whether the search ran to its natural end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// Finished within the deadline
    Complete,
    /// Cut short by the deadline; results are whatever had accumulated
    Partial,
}

impl Completion {
    /// `true` for [`Completion::Complete`]
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Tolerances and stop condition of the widening loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Extras tolerance of the first round
    pub initial_extras_threshold: u32,
    /// Extras tolerance of the last round (inclusive)
    pub max_extras_threshold: u32,
    /// Distinct recipes that end the search early
    pub target_count: usize,
}

impl From<&RecommendationConfig> for SearchParams {
    fn from(config: &RecommendationConfig) -> Self {
        Self {
            initial_extras_threshold: config.initial_extras_threshold,
            max_extras_threshold: config.max_extras_threshold,
            target_count: config.result_limit,
        }
    }
}

/// Everything the search accumulated
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Accepted scored recipes in scan order; a recipe reappears once per round that accepted it
    pub scored: Vec<ScoredRecipe>,
    /// How the search ended
    pub completion: Completion,
    /// Rounds started
    pub rounds: u32,
}

/// Drives scoring rounds over a fixed candidate list
pub struct WideningSearch {
    recipes: Arc<dyn RecipeRepository>,
    params: SearchParams,
}

struct Accumulator {
    scored: Vec<ScoredRecipe>,
    distinct: HashSet<RecipeId>,
    rounds: u32,
}

impl Accumulator {
    fn finish(self, completion: Completion) -> SearchResult {
        SearchResult {
            scored: self.scored,
            completion,
            rounds: self.rounds,
        }
    }
}

impl WideningSearch {
    /// Create a search over the recipe ingredient join
    #[must_use]
    pub fn new(recipes: Arc<dyn RecipeRepository>, params: SearchParams) -> Self {
        Self { recipes, params }
    }

    /// Run the widening loop.
    ///
    /// `now` is the request's reference time; every round scores against it.
    ///
    /// # Errors
    ///
    /// Returns a database error if any ingredient lookup fails; a failed
    /// lookup is never skipped
    pub async fn run(
        &self,
        candidates: &[Recipe],
        pantry: &Pantry,
        now: DateTime<Utc>,
        deadline: &SearchDeadline,
    ) -> AppResult<SearchResult> {
        let mut acc = Accumulator {
            scored: Vec::new(),
            distinct: HashSet::new(),
            rounds: 0,
        };

        for threshold in self.params.initial_extras_threshold..=self.params.max_extras_threshold {
            acc.rounds += 1;

            for recipe in candidates {
                if deadline.is_expired() {
                    return Ok(acc.finish(Completion::Partial));
                }
                let Some(ingredient_ids) = deadline
                    .bound(self.recipes.get_recipe_ingredient_ids(recipe.id))
                    .await
                else {
                    return Ok(acc.finish(Completion::Partial));
                };

                let scored = score_recipe(recipe, &ingredient_ids?, pantry, now);
                if scored.extras() > threshold as usize {
                    continue;
                }
                acc.distinct.insert(scored.recipe.id);
                acc.scored.push(scored);
            }

            debug!(
                round = acc.rounds,
                extras_threshold = threshold,
                accepted = acc.scored.len(),
                distinct = acc.distinct.len(),
                "Widening round finished"
            );

            // Once every candidate is accepted, wider rounds cannot change the result
            if acc.distinct.len() >= self.params.target_count
                || acc.distinct.len() == candidates.len()
            {
                return Ok(acc.finish(Completion::Complete));
            }
            if deadline.is_expired() {
                return Ok(acc.finish(Completion::Partial));
            }
        }

        Ok(acc.finish(Completion::Complete))
    }
}
