// ABOUTME: Repository traits the recommendation engine reads and writes through
// ABOUTME: Decouples the engine from SQLite so tests can supply in-memory fakes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! # Repository Pattern
//!
//! Each trait covers one collaborator contract of the engine. The `*Impl`
//! types delegate to [`Database`](crate::database::Database) and map every
//! failure to [`DatabaseError`].

mod profile_repository;
mod recipe_repository;
mod recommendation_repository;

pub use profile_repository::ProfileRepositoryImpl;
pub use recipe_repository::RecipeRepositoryImpl;
pub use recommendation_repository::RecommendationRepositoryImpl;

use super::DatabaseError;
use async_trait::async_trait;
use pantry_chef_core::models::{
    CandidateFilter, IngredientId, Recipe, RecipeId, Recommendation, RecommendedRecipe, UserId,
    UserProfile,
};
use std::collections::HashSet;

/// Read access to user profiles and allergies
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Profile snapshot, or `None` if the user does not exist
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, DatabaseError>;

    /// Ingredient ids the user must never be served
    async fn get_allergy_ids(&self, user_id: UserId)
        -> Result<HashSet<IngredientId>, DatabaseError>;
}

/// Read access to the recipe catalog
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Recipes admitted by `filter`, in ascending id order
    async fn get_eligible_recipes(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<Recipe>, DatabaseError>;

    /// Required ingredient ids of a recipe
    async fn get_recipe_ingredient_ids(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<IngredientId>, DatabaseError>;
}

/// Append-only recommendation history
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Every recipe id ever recommended to the user
    async fn get_recommended_recipe_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<RecipeId>, DatabaseError>;

    /// Append one history row
    async fn insert(&self, recommendation: &Recommendation) -> Result<(), DatabaseError>;

    /// History joined with recipes, newest first
    async fn list_history(&self, user_id: UserId) -> Result<Vec<RecommendedRecipe>, DatabaseError>;
}
