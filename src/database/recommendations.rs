// ABOUTME: Database operations for the append-only recommendation history
// ABOUTME: Inserts recorded suggestions and reads them back for exclusion and listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::recipes::{row_to_recipe, RECIPE_COLUMNS};
use super::Database;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, SecondsFormat, Utc};
use pantry_chef_core::models::{RecipeId, Recommendation, RecommendedRecipe, UserId};
use sqlx::Row;
use std::collections::HashSet;

impl Database {
    /// Append one history row
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including foreign-key violations
    pub async fn insert_recommendation(&self, recommendation: &Recommendation) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO recommendations (user_id, recipe_id, recommended_at) VALUES ($1, $2, $3)",
        )
        .bind(recommendation.user_id)
        .bind(recommendation.recipe_id)
        // Fixed-width UTC timestamps keep lexical order equal to time order
        .bind(
            recommendation
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!(
                "Failed to record recipe {} for user {}: {e}",
                recommendation.recipe_id, recommendation.user_id
            ))
        })?;
        Ok(())
    }

    /// Every recipe id ever recommended to the user
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_recommended_recipe_ids(&self, user_id: UserId) -> AppResult<HashSet<RecipeId>> {
        let ids: Vec<RecipeId> =
            sqlx::query_scalar("SELECT DISTINCT recipe_id FROM recommendations WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to get history for user {user_id}: {e}"))
                })?;

        Ok(ids.into_iter().collect())
    }

    /// The user's history joined with recipes, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or a stored timestamp is malformed
    pub async fn list_recommendation_history(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<RecommendedRecipe>> {
        let sql = format!(
            r"
            SELECT {RECIPE_COLUMNS}, h.recommended_at
            FROM recommendations h
            JOIN recipes r ON r.id = h.recipe_id
            WHERE h.user_id = $1
            ORDER BY h.recommended_at DESC, h.id DESC
            "
        );

        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to list history for user {user_id}: {e}"))
            })?;

        rows.iter()
            .map(|row| {
                let recipe = row_to_recipe(row)
                    .map_err(|e| AppError::database(format!("Failed to decode recipe: {e}")))?;
                let raw: String = row
                    .try_get("recommended_at")
                    .map_err(|e| AppError::database(format!("Failed to decode timestamp: {e}")))?;
                let recommended_at = DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| {
                        AppError::database(format!("Invalid stored timestamp '{raw}': {e}"))
                    })?
                    .with_timezone(&Utc);

                Ok(RecommendedRecipe {
                    recipe,
                    recommended_at,
                })
            })
            .collect()
    }
}
