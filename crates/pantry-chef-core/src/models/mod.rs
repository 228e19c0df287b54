// ABOUTME: Core data models shared by the store, the engine, and the HTTP layer
// ABOUTME: Re-exports profile, recipe, pantry, and recommendation types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! Domain models

/// User profile and lifestyle rules
pub mod profile;
/// Recipes, their ingredient joins, and scored results
pub mod recipe;
/// Ingredients held by the user with expiration dates
pub mod pantry;
/// Persisted recommendation history
pub mod recommendation;

pub use pantry::AvailableIngredient;
pub use profile::{CandidateFilter, LifestyleRule, UserProfile};
pub use recipe::{Recipe, ScoredRecipe};
pub use recommendation::{Recommendation, RecommendedRecipe};

/// Identifier of a user row
pub type UserId = i64;
/// Identifier of a recipe row
pub type RecipeId = i64;
/// Identifier of an ingredient row
pub type IngredientId = i64;
/// Identifier of a lifestyle category
pub type LifestyleId = i64;
/// Ordinal cooking-skill tier
pub type ExperienceLevelId = i64;
