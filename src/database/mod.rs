// ABOUTME: SQLite store for users, recipes, ingredient joins, allergies, and recommendation history
// ABOUTME: Owns the connection pool, schema migration, and the health ping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! # Database Management
//!
//! The relational store behind the recommendation engine. Query methods live
//! in per-table modules as `impl Database` blocks; the engine only sees the
//! repository traits in [`repositories`].

mod profiles;
mod recipes;
mod recommendations;

/// Idempotent demo data for local development
pub mod seed;

/// Repository traits and their `SQLite`-backed implementations
pub mod repositories;

pub use pantry_chef_core::errors::DatabaseError;
pub use profiles::NewUser;
pub use recipes::NewRecipe;

use crate::config::database::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};

/// Connection pool wrapper shared by every repository
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database described by `config` and create the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or migration fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = &config.url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::from(DatabaseError::ConnectionError {
                        message: format!("cannot create {}: {e}", parent.display()),
                    })
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&config.url.to_connection_string())
            .map_err(|e| DatabaseError::ConnectionError {
                message: e.to_string(),
            })?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.pool_size());
        if config.url.is_memory() {
            // The in-memory database lives exactly as long as its one connection
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError {
                message: e.to_string(),
            })?;

        info!(database = %config.url, pool_size = config.pool_size(), "Database connected");

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query; used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Create every table and index if missing
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_reference_data().await?;
        self.migrate_users().await?;
        self.migrate_recipes().await?;
        self.migrate_recommendations().await?;
        debug!("Database schema ready");
        Ok(())
    }

    async fn migrate_reference_data(&self) -> AppResult<()> {
        self.execute_ddl(
            "lifestyles",
            r"
            CREATE TABLE IF NOT EXISTS lifestyles (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_ddl(
            "experience_levels",
            r"
            CREATE TABLE IF NOT EXISTS experience_levels (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_ddl(
            "ingredients",
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )
            ",
        )
        .await
    }

    async fn migrate_users(&self) -> AppResult<()> {
        self.execute_ddl(
            "users",
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                lifestyle_id INTEGER NOT NULL REFERENCES lifestyles(id),
                experience_level_id INTEGER NOT NULL REFERENCES experience_levels(id),
                created_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_ddl(
            "user_allergies",
            r"
            CREATE TABLE IF NOT EXISTS user_allergies (
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id),
                PRIMARY KEY (user_id, ingredient_id)
            )
            ",
        )
        .await
    }

    async fn migrate_recipes(&self) -> AppResult<()> {
        self.execute_ddl(
            "recipes",
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                ingredients_text TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                steps TEXT NOT NULL DEFAULT '',
                calories REAL NOT NULL DEFAULT 0,
                minutes INTEGER NOT NULL DEFAULT 0,
                lifestyle_id INTEGER NOT NULL REFERENCES lifestyles(id),
                experience_level_id INTEGER NOT NULL REFERENCES experience_levels(id)
            )
            ",
        )
        .await?;

        self.execute_ddl(
            "recipe_ingredients",
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id),
                PRIMARY KEY (recipe_id, ingredient_id)
            )
            ",
        )
        .await?;

        self.execute_ddl(
            "idx_recipes_eligibility",
            "CREATE INDEX IF NOT EXISTS idx_recipes_eligibility ON recipes(lifestyle_id, experience_level_id)",
        )
        .await?;

        self.execute_ddl(
            "idx_recipe_ingredients_ingredient",
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient ON recipe_ingredients(ingredient_id)",
        )
        .await
    }

    async fn migrate_recommendations(&self) -> AppResult<()> {
        self.execute_ddl(
            "recommendations",
            r"
            CREATE TABLE IF NOT EXISTS recommendations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                recommended_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_ddl(
            "idx_recommendations_user",
            "CREATE INDEX IF NOT EXISTS idx_recommendations_user ON recommendations(user_id, recommended_at)",
        )
        .await
    }

    async fn execute_ddl(&self, object: &str, statement: &str) -> AppResult<()> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::MigrationError {
                context: format!("{object}: {e}"),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_migrates_and_pings() {
        let db = Database::new(&DatabaseConfig::in_memory()).await.unwrap();
        db.ping().await.unwrap();

        // Migration is repeatable
        db.migrate().await.unwrap();

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(db.pool())
                .await
                .unwrap();
        for expected in [
            "experience_levels",
            "ingredients",
            "lifestyles",
            "recipe_ingredients",
            "recipes",
            "recommendations",
            "user_allergies",
            "users",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
    }
}
