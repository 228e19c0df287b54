// ABOUTME: Candidate generator and allergy filter feeding the widening search
// ABOUTME: Applies tier, lifestyle, and history rules, then drops allergenic recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::deadline::SearchDeadline;
use super::profile::ResolvedProfile;
use crate::database::repositories::{RecipeRepository, RecommendationRepository};
use crate::errors::AppResult;
use pantry_chef_core::models::{CandidateFilter, IngredientId, LifestyleId, Recipe};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Produces the recipes a user is eligible for
pub struct CandidateGenerator {
    recipes: Arc<dyn RecipeRepository>,
    history: Arc<dyn RecommendationRepository>,
    restrictive_lifestyle_id: LifestyleId,
}

impl CandidateGenerator {
    /// Create a generator over the catalog and history repositories
    #[must_use]
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        history: Arc<dyn RecommendationRepository>,
        restrictive_lifestyle_id: LifestyleId,
    ) -> Self {
        Self {
            recipes,
            history,
            restrictive_lifestyle_id,
        }
    }

    /// Eligible recipes in ascending id order, or `Ok(None)` if the deadline passed
    ///
    /// # Errors
    ///
    /// Returns a database error if the history or catalog read fails
    pub async fn generate(
        &self,
        resolved: &ResolvedProfile,
        deadline: &SearchDeadline,
    ) -> AppResult<Option<Vec<Recipe>>> {
        let user_id = resolved.profile.id;
        let Some(excluded) = deadline
            .bound(self.history.get_recommended_recipe_ids(user_id))
            .await
        else {
            return Ok(None);
        };
        let filter = CandidateFilter::for_profile(
            &resolved.profile,
            self.restrictive_lifestyle_id,
            excluded?,
        );

        let Some(recipes) = deadline
            .bound(self.recipes.get_eligible_recipes(&filter))
            .await
        else {
            return Ok(None);
        };

        // Eligibility is re-checked in process for every repository
        let candidates: Vec<Recipe> = recipes?
            .into_iter()
            .filter(|recipe| filter.admits(recipe))
            .collect();

        debug!(
            user_id,
            candidates = candidates.len(),
            excluded = filter.excluded_recipe_ids.len(),
            "Generated candidate recipes"
        );
        Ok(Some(candidates))
    }
}

/// Result of filtering candidates for allergens
#[derive(Debug, Clone, PartialEq)]
pub struct AllergyFiltered {
    /// Candidates confirmed free of allergens, in input order
    pub recipes: Vec<Recipe>,
    /// `false` when the deadline cut filtering short; unchecked candidates are dropped
    pub complete: bool,
}

/// Removes recipes containing any of the user's allergens
pub struct AllergyFilter {
    recipes: Arc<dyn RecipeRepository>,
}

impl AllergyFilter {
    /// Create a filter over the recipe ingredient join
    #[must_use]
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }

    /// Keep only candidates whose ingredient set misses every allergy id
    ///
    /// # Errors
    ///
    /// Returns a database error if any ingredient lookup fails
    pub async fn filter(
        &self,
        candidates: Vec<Recipe>,
        allergy_ids: &HashSet<IngredientId>,
        deadline: &SearchDeadline,
    ) -> AppResult<AllergyFiltered> {
        if allergy_ids.is_empty() {
            return Ok(AllergyFiltered {
                recipes: candidates,
                complete: true,
            });
        }

        let mut safe = Vec::with_capacity(candidates.len());
        for recipe in candidates {
            if deadline.is_expired() {
                return Ok(AllergyFiltered {
                    recipes: safe,
                    complete: false,
                });
            }
            let Some(ingredient_ids) = deadline
                .bound(self.recipes.get_recipe_ingredient_ids(recipe.id))
                .await
            else {
                return Ok(AllergyFiltered {
                    recipes: safe,
                    complete: false,
                });
            };

            if ingredient_ids?.iter().any(|id| allergy_ids.contains(id)) {
                debug!(recipe_id = recipe.id, "Dropping recipe containing an allergen");
                continue;
            }
            safe.push(recipe);
        }

        Ok(AllergyFiltered {
            recipes: safe,
            complete: true,
        })
    }
}
