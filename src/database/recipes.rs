// ABOUTME: Database operations for the recipe catalog and its authoritative ingredient join
// ABOUTME: Builds the eligibility query from a CandidateFilter and reads recipe ingredient ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::Database;
use crate::errors::{AppError, AppResult};
use pantry_chef_core::models::{
    CandidateFilter, ExperienceLevelId, IngredientId, LifestyleId, LifestyleRule, Recipe, RecipeId,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

/// Columns selected whenever a full recipe row is read
pub(super) const RECIPE_COLUMNS: &str = "r.id, r.name, r.ingredients_text, r.description, r.steps, r.calories, r.minutes, r.lifestyle_id, r.experience_level_id";

/// Fields needed to create a recipe
#[derive(Debug, Clone)]
pub struct NewRecipe {
    /// Display name
    pub name: String,
    /// Free-text ingredient description
    pub ingredients_text: String,
    /// Short description
    pub description: String,
    /// Preparation steps
    pub steps: String,
    /// Calories per serving
    pub calories: f64,
    /// Preparation time in minutes
    pub minutes: i64,
    /// Lifestyle category
    pub lifestyle_id: LifestyleId,
    /// Required skill tier
    pub experience_level_id: ExperienceLevelId,
}

/// Decode a row selected with [`RECIPE_COLUMNS`]
pub(super) fn row_to_recipe(row: &SqliteRow) -> Result<Recipe, sqlx::Error> {
    Ok(Recipe {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        ingredients_text: row.try_get("ingredients_text")?,
        description: row.try_get("description")?,
        steps: row.try_get("steps")?,
        calories: row.try_get("calories")?,
        minutes: row.try_get("minutes")?,
        lifestyle_id: row.try_get("lifestyle_id")?,
        experience_level_id: row.try_get("experience_level_id")?,
    })
}

impl Database {
    /// Create an ingredient, returning the existing id when the name is taken
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn upsert_ingredient(&self, name: &str) -> AppResult<IngredientId> {
        sqlx::query_scalar(
            "INSERT INTO ingredients (name) VALUES ($1) ON CONFLICT(name) DO UPDATE SET name = excluded.name RETURNING id",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert ingredient {name}: {e}")))
    }

    /// Whether an ingredient with this id exists
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn ingredient_exists(&self, ingredient_id: IngredientId) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ingredients WHERE id = $1)")
            .bind(ingredient_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to look up ingredient {ingredient_id}: {e}"))
            })
    }

    /// Look up a recipe id by exact name
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn find_recipe_id_by_name(&self, name: &str) -> AppResult<Option<RecipeId>> {
        sqlx::query_scalar("SELECT id FROM recipes WHERE name = $1 ORDER BY id LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find recipe {name}: {e}")))
    }

    /// Insert a recipe together with its required ingredient ids
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails; nothing is written in that case
    pub async fn create_recipe(
        &self,
        recipe: &NewRecipe,
        ingredient_ids: &[IngredientId],
    ) -> AppResult<RecipeId> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let recipe_id: RecipeId = sqlx::query_scalar(
            r"
            INSERT INTO recipes (name, ingredients_text, description, steps, calories, minutes, lifestyle_id, experience_level_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(&recipe.name)
        .bind(&recipe.ingredients_text)
        .bind(&recipe.description)
        .bind(&recipe.steps)
        .bind(recipe.calories)
        .bind(recipe.minutes)
        .bind(recipe.lifestyle_id)
        .bind(recipe.experience_level_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe {}: {e}", recipe.name)))?;

        for ingredient_id in ingredient_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO recipe_ingredients (recipe_id, ingredient_id) VALUES ($1, $2)",
            )
            .bind(recipe_id)
            .bind(ingredient_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to link ingredient {ingredient_id} to recipe {recipe_id}: {e}"
                ))
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        Ok(recipe_id)
    }

    /// Recipes passing the tier, lifestyle, and exclusion rules, ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_eligible_recipes(&self, filter: &CandidateFilter) -> AppResult<Vec<Recipe>> {
        let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT ");
        query.push(RECIPE_COLUMNS);
        query.push(" FROM recipes r WHERE r.experience_level_id BETWEEN 0 AND ");
        query.push_bind(filter.max_experience_level);

        match &filter.lifestyle {
            LifestyleRule::Exact(lifestyle_id) => {
                query.push(" AND r.lifestyle_id = ");
                query.push_bind(*lifestyle_id);
            }
            LifestyleRule::AvoidNameTerms(terms) => {
                for term in terms {
                    query.push(" AND LOWER(r.name) NOT LIKE ");
                    query.push_bind(format!("%{}%", term.to_lowercase()));
                }
            }
        }

        if !filter.excluded_recipe_ids.is_empty() {
            let mut excluded: Vec<RecipeId> = filter.excluded_recipe_ids.iter().copied().collect();
            excluded.sort_unstable();

            query.push(" AND r.id NOT IN (");
            let mut separated = query.separated(", ");
            for recipe_id in excluded {
                separated.push_bind(recipe_id);
            }
            separated.push_unseparated(")");
        }

        query.push(" ORDER BY r.id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get eligible recipes: {e}")))?;

        rows.iter()
            .map(row_to_recipe)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::database(format!("Failed to decode recipe: {e}")))
    }

    /// Required ingredient ids of one recipe from the authoritative join
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_recipe_ingredient_ids(
        &self,
        recipe_id: RecipeId,
    ) -> AppResult<Vec<IngredientId>> {
        sqlx::query_scalar(
            "SELECT ingredient_id FROM recipe_ingredients WHERE recipe_id = $1 ORDER BY ingredient_id",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!(
                "Failed to get ingredients for recipe {recipe_id}: {e}"
            ))
        })
    }
}
