// ABOUTME: Recommendation history repository implementation over the SQLite store
// ABOUTME: Reads the exclusion set, appends recorded suggestions, and lists history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::RecommendationRepository;
use crate::database::{Database, DatabaseError};
use async_trait::async_trait;
use pantry_chef_core::models::{RecipeId, Recommendation, RecommendedRecipe, UserId};
use std::collections::HashSet;

/// `SQLite` implementation of `RecommendationRepository`
pub struct RecommendationRepositoryImpl {
    db: Database,
}

impl RecommendationRepositoryImpl {
    /// Create a new `RecommendationRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecommendationRepository for RecommendationRepositoryImpl {
    async fn get_recommended_recipe_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<RecipeId>, DatabaseError> {
        self.db
            .get_recommended_recipe_ids(user_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn insert(&self, recommendation: &Recommendation) -> Result<(), DatabaseError> {
        self.db
            .insert_recommendation(recommendation)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn list_history(&self, user_id: UserId) -> Result<Vec<RecommendedRecipe>, DatabaseError> {
        self.db
            .list_recommendation_history(user_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }
}
