// ABOUTME: Database operations for users, lifestyles, experience tiers, and allergies
// ABOUTME: Resolves the profile snapshot and allergy set the engine needs per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::Database;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use pantry_chef_core::models::{ExperienceLevelId, IngredientId, LifestyleId, UserId, UserProfile};
use sqlx::Row;
use std::collections::HashSet;

/// Fields needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Unique email address
    pub email: String,
    /// Dietary lifestyle category
    pub lifestyle_id: LifestyleId,
    /// Cooking-skill tier
    pub experience_level_id: ExperienceLevelId,
}

impl Database {
    /// Insert a lifestyle category unless it already exists
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn upsert_lifestyle(&self, id: LifestyleId, name: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO lifestyles (id, name) VALUES ($1, $2) ON CONFLICT(id) DO UPDATE SET name = excluded.name")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to upsert lifestyle {id}: {e}")))?;
        Ok(())
    }

    /// Insert an experience tier unless it already exists
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn upsert_experience_level(
        &self,
        id: ExperienceLevelId,
        name: &str,
    ) -> AppResult<()> {
        sqlx::query("INSERT INTO experience_levels (id, name) VALUES ($1, $2) ON CONFLICT(id) DO UPDATE SET name = excluded.name")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to upsert experience level {id}: {e}"))
            })?;
        Ok(())
    }

    /// Create a user, or update the existing user with the same email
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn upsert_user(&self, user: &NewUser) -> AppResult<UserId> {
        let id: UserId = sqlx::query_scalar(
            r"
            INSERT INTO users (name, email, lifestyle_id, experience_level_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(email) DO UPDATE SET
                name = excluded.name,
                lifestyle_id = excluded.lifestyle_id,
                experience_level_id = excluded.experience_level_id
            RETURNING id
            ",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.lifestyle_id)
        .bind(user.experience_level_id)
        .bind(Utc::now().to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert user {}: {e}", user.email)))?;

        Ok(id)
    }

    /// Load the recommendation-relevant profile of a user
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_user_profile(&self, user_id: UserId) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query("SELECT id, lifestyle_id, experience_level_id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user {user_id}: {e}")))?;

        row.map(|row| {
            Ok::<_, sqlx::Error>(UserProfile {
                id: row.try_get("id")?,
                lifestyle_id: row.try_get("lifestyle_id")?,
                experience_level_id: row.try_get("experience_level_id")?,
            })
        })
        .transpose()
        .map_err(|e| AppError::database(format!("Failed to decode user {user_id}: {e}")))
    }

    /// Record that a user must never be served an ingredient
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn add_user_allergy(
        &self,
        user_id: UserId,
        ingredient_id: IngredientId,
    ) -> AppResult<()> {
        sqlx::query("INSERT OR IGNORE INTO user_allergies (user_id, ingredient_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(ingredient_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to add allergy for user {user_id}: {e}"))
            })?;
        Ok(())
    }

    /// Ingredient ids the user is allergic to
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_user_allergy_ids(&self, user_id: UserId) -> AppResult<HashSet<IngredientId>> {
        let ids: Vec<IngredientId> =
            sqlx::query_scalar("SELECT ingredient_id FROM user_allergies WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to get allergies for user {user_id}: {e}"))
                })?;

        Ok(ids.into_iter().collect())
    }
}
