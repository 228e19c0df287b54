// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, catalog fixtures, and server resource helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `pantry_chef_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use chrono::{Duration, Utc};
use pantry_chef_core::models::{AvailableIngredient, IngredientId, RecipeId, UserId};
use pantry_chef_server::{
    config::{environment::ServerConfig, DatabaseConfig},
    database::{Database, NewRecipe, NewUser},
    resources::{ServerResources, ServerResourcesBuilder},
};
use std::sync::{Arc, Once};

/// Restrictive (plant-based) lifestyle id used across fixtures
pub const PLANT_BASED: i64 = 1;
/// Omnivore lifestyle id used across fixtures
pub const OMNIVORE: i64 = 2;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup: in-memory store with lifestyles and tiers 0..=2
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new(&DatabaseConfig::in_memory()).await?;
    database.upsert_lifestyle(PLANT_BASED, "Plant-based").await?;
    database.upsert_lifestyle(OMNIVORE, "Omnivore").await?;
    for (tier, name) in [(0, "Beginner"), (1, "Home cook"), (2, "Advanced")] {
        database.upsert_experience_level(tier, name).await?;
    }
    Ok(database)
}

/// Create a user with the given lifestyle and tier
pub async fn create_test_user(
    database: &Database,
    email: &str,
    lifestyle_id: i64,
    tier: i64,
) -> Result<UserId> {
    Ok(database
        .upsert_user(&NewUser {
            name: email.split('@').next().unwrap_or(email).to_owned(),
            email: email.to_owned(),
            lifestyle_id,
            experience_level_id: tier,
        })
        .await?)
}

/// Create (or fetch) ingredients by name, returning ids in input order
pub async fn create_ingredients(database: &Database, names: &[&str]) -> Result<Vec<IngredientId>> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        ids.push(database.upsert_ingredient(name).await?);
    }
    Ok(ids)
}

/// Create a recipe with the given lifestyle, tier, and required ingredient ids
pub async fn create_test_recipe(
    database: &Database,
    name: &str,
    lifestyle_id: i64,
    tier: i64,
    ingredient_ids: &[IngredientId],
) -> Result<RecipeId> {
    Ok(database
        .create_recipe(
            &NewRecipe {
                name: name.to_owned(),
                ingredients_text: format!("{} ingredients", ingredient_ids.len()),
                description: format!("Test recipe {name}"),
                steps: "Combine and cook.".to_owned(),
                calories: 400.0,
                minutes: 20,
                lifestyle_id,
                experience_level_id: tier,
            },
            ingredient_ids,
        )
        .await?)
}

/// A held ingredient expiring `days` from now
pub fn held(ingredient_id: IngredientId, days: i64) -> AvailableIngredient {
    AvailableIngredient {
        ingredient_id,
        expiration_date: Utc::now() + Duration::days(days),
    }
}

/// Server configuration backed by an in-memory store
pub fn test_server_config() -> ServerConfig {
    ServerConfig {
        database: DatabaseConfig::in_memory(),
        ..ServerConfig::default()
    }
}

/// Build server resources over an existing database
pub fn create_test_resources(database: Database, config: ServerConfig) -> Arc<ServerResources> {
    ServerResourcesBuilder::new()
        .with_database(database)
        .with_config(Arc::new(config))
        .build_arc()
        .expect("Failed to build server resources")
}
