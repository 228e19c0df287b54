// ABOUTME: Pure ingredient matcher and scorer for one recipe against a pantry
// ABOUTME: Combines the match ratio with expiration urgency of the held ingredients used
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! Recipe scoring
//!
//! `total = 0.7 * matched / required + 0.3 * clamp(1 - min_days / 30, 0, 1)`,
//! where `min_days` is the soonest expiry among held ingredients the recipe
//! requires. The extras gate is applied by the search controller, not here.

use super::pantry::Pantry;
use crate::constants::scoring::{
    EXPIRATION_HORIZON_DAYS, EXPIRATION_PRIORITY_WEIGHT, INGREDIENT_MATCH_WEIGHT,
};
use chrono::{DateTime, Utc};
use pantry_chef_core::models::{IngredientId, Recipe, ScoredRecipe};
use std::collections::HashSet;

/// Urgency in `[0, 1]` for an ingredient that expires in `days_remaining` days
#[must_use]
pub fn expiration_priority(days_remaining: f64) -> f64 {
    (1.0 - days_remaining / EXPIRATION_HORIZON_DAYS).clamp(0.0, 1.0)
}

/// Score `recipe` given its required ingredient ids and the user's pantry
#[must_use]
pub fn score_recipe(
    recipe: &Recipe,
    required_ingredient_ids: &[IngredientId],
    pantry: &Pantry,
    now: DateTime<Utc>,
) -> ScoredRecipe {
    let required: HashSet<IngredientId> = required_ingredient_ids.iter().copied().collect();
    let total_ingredient_count = required.len();
    let matched_count = required.iter().filter(|id| pantry.holds(**id)).count();

    let ingredient_match = if total_ingredient_count == 0 {
        0.0
    } else {
        matched_count as f64 / total_ingredient_count as f64
    };

    let min_days = pantry
        .entries()
        .iter()
        .filter(|entry| required.contains(&entry.ingredient_id))
        .map(|entry| entry.days_remaining(now))
        .fold(f64::INFINITY, f64::min);

    let expiration = if matched_count > 0 {
        expiration_priority(min_days)
    } else {
        0.0
    };

    ScoredRecipe {
        recipe: recipe.clone(),
        total_score: INGREDIENT_MATCH_WEIGHT.mul_add(
            ingredient_match,
            EXPIRATION_PRIORITY_WEIGHT * expiration,
        ),
        matched_count,
        total_ingredient_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pantry_chef_core::models::AvailableIngredient;

    fn recipe(id: i64) -> Recipe {
        Recipe {
            id,
            name: format!("Recipe {id}"),
            ingredients_text: String::new(),
            description: String::new(),
            steps: String::new(),
            calories: 0.0,
            minutes: 10,
            lifestyle_id: 2,
            experience_level_id: 0,
        }
    }

    fn pantry(now: DateTime<Utc>, items: &[(i64, i64)]) -> Pantry {
        Pantry::new(
            items
                .iter()
                .map(|(id, days)| AvailableIngredient {
                    ingredient_id: *id,
                    expiration_date: now + Duration::days(*days),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_expiration_priority_curve() {
        assert!((expiration_priority(1.0) - 0.966_666).abs() < 1e-3);
        assert!(expiration_priority(30.0).abs() < f64::EPSILON);
        assert!(expiration_priority(60.0).abs() < f64::EPSILON);
        // Already expired saturates at full urgency
        assert!((expiration_priority(-3.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_widening_example_match_ratios() {
        let now = Utc::now();
        let held = pantry(now, &[(10, 5), (11, 5)]);

        let a = score_recipe(&recipe(1), &[10, 11, 12, 13, 14, 15], &held, now);
        let b = score_recipe(&recipe(2), &[10, 11, 12, 13], &held, now);
        let c = score_recipe(&recipe(3), &[10, 16], &held, now);

        assert_eq!(a.extras(), 4);
        assert_eq!(b.extras(), 2);
        assert_eq!(c.extras(), 1);
        assert_eq!(c.matched_count, 1);

        // Same match ratio and same soonest expiry give the same score
        assert!((b.total_score - c.total_score).abs() < 1e-12);
        let expected = 0.7 * 0.5 + 0.3 * (1.0 - 5.0 / 30.0);
        assert!((b.total_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_soonest_expiring_match_drives_urgency() {
        let now = Utc::now();
        let held = pantry(now, &[(1, 1), (2, 20), (3, 60)]);

        let scored = score_recipe(&recipe(1), &[1, 2], &held, now);
        let expected = 0.7 + 0.3 * (1.0 - 1.0 / 30.0);
        assert!((scored.total_score - expected).abs() < 1e-9);

        // Ingredient 1 is not required here, so only the 60-day item counts
        let distant = score_recipe(&recipe(2), &[3, 4], &held, now);
        assert!((distant.total_score - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_pantry_entries_use_earliest_expiry() {
        let now = Utc::now();
        let held = pantry(now, &[(7, 25), (7, 3)]);

        let scored = score_recipe(&recipe(1), &[7], &held, now);
        let expected = 0.7 + 0.3 * (1.0 - 3.0 / 30.0);
        assert!((scored.total_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_no_match_and_empty_recipe_score_zero() {
        let now = Utc::now();
        let held = pantry(now, &[(1, 1)]);

        let unmatched = score_recipe(&recipe(1), &[2, 3], &held, now);
        assert_eq!(unmatched.matched_count, 0);
        assert!(unmatched.total_score.abs() < f64::EPSILON);

        let empty = score_recipe(&recipe(2), &[], &held, now);
        assert_eq!(empty.total_ingredient_count, 0);
        assert!(empty.total_score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_stays_within_unit_interval() {
        let now = Utc::now();
        let held = pantry(now, &[(1, -10), (2, -10)]);

        let scored = score_recipe(&recipe(1), &[1, 2], &held, now);
        assert!((0.0..=1.0).contains(&scored.total_score));
        assert!((scored.total_score - 1.0).abs() < 1e-9);
    }
}
