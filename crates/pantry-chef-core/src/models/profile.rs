// ABOUTME: User profile snapshot and the candidate eligibility rules derived from it
// ABOUTME: Encodes skill tiers, lifestyle matching, forbidden terms, and history exclusion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::{ExperienceLevelId, LifestyleId, Recipe, RecipeId, UserId};
use crate::constants::lifestyle::FORBIDDEN_NAME_TERMS;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Read-only snapshot of a user's recommendation-relevant profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User id
    pub id: UserId,
    /// Dietary lifestyle category
    pub lifestyle_id: LifestyleId,
    /// Cooking-skill tier
    pub experience_level_id: ExperienceLevelId,
}

/// How recipes are matched against a user's lifestyle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifestyleRule {
    /// Recipe must carry exactly this lifestyle id
    Exact(LifestyleId),
    /// Any lifestyle, but the recipe name must avoid every listed term
    AvoidNameTerms(Vec<String>),
}

impl LifestyleRule {
    /// Build the rule for a user given which lifestyle id is the restrictive one
    #[must_use]
    pub fn for_lifestyle(lifestyle_id: LifestyleId, restrictive_lifestyle_id: LifestyleId) -> Self {
        if lifestyle_id == restrictive_lifestyle_id {
            Self::AvoidNameTerms(
                FORBIDDEN_NAME_TERMS
                    .iter()
                    .map(|term| (*term).to_owned())
                    .collect(),
            )
        } else {
            Self::Exact(lifestyle_id)
        }
    }

    /// Whether a recipe satisfies this rule
    #[must_use]
    pub fn admits(&self, recipe: &Recipe) -> bool {
        match self {
            Self::Exact(lifestyle_id) => recipe.lifestyle_id == *lifestyle_id,
            Self::AvoidNameTerms(terms) => {
                let name = recipe.name.to_lowercase();
                !terms.iter().any(|term| name.contains(&term.to_lowercase()))
            }
        }
    }
}

/// Eligibility filter handed to the store when fetching candidate recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Lifestyle rule to enforce
    pub lifestyle: LifestyleRule,
    /// Highest experience tier allowed (inclusive, tiers start at 0)
    pub max_experience_level: ExperienceLevelId,
    /// Recipe ids that must never be returned
    pub excluded_recipe_ids: HashSet<RecipeId>,
}

impl CandidateFilter {
    /// Derive the filter for a profile and its recommendation history
    #[must_use]
    pub fn for_profile(
        profile: &UserProfile,
        restrictive_lifestyle_id: LifestyleId,
        excluded_recipe_ids: HashSet<RecipeId>,
    ) -> Self {
        Self {
            lifestyle: LifestyleRule::for_lifestyle(
                profile.lifestyle_id,
                restrictive_lifestyle_id,
            ),
            max_experience_level: profile.experience_level_id,
            excluded_recipe_ids,
        }
    }

    /// Whether a recipe passes every eligibility rule
    #[must_use]
    pub fn admits(&self, recipe: &Recipe) -> bool {
        (0..=self.max_experience_level).contains(&recipe.experience_level_id)
            && !self.excluded_recipe_ids.contains(&recipe.id)
            && self.lifestyle.admits(recipe)
    }
}
