// ABOUTME: Recipe repository implementation over the SQLite store
// ABOUTME: Serves eligible candidate recipes and their authoritative ingredient joins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::RecipeRepository;
use crate::database::{Database, DatabaseError};
use async_trait::async_trait;
use pantry_chef_core::models::{CandidateFilter, IngredientId, Recipe, RecipeId};

/// `SQLite` implementation of `RecipeRepository`
pub struct RecipeRepositoryImpl {
    db: Database,
}

impl RecipeRepositoryImpl {
    /// Create a new `RecipeRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeRepository for RecipeRepositoryImpl {
    async fn get_eligible_recipes(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<Recipe>, DatabaseError> {
        self.db
            .get_eligible_recipes(filter)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn get_recipe_ingredient_ids(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<IngredientId>, DatabaseError> {
        self.db
            .get_recipe_ingredient_ids(recipe_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }
}
