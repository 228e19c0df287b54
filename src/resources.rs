// ABOUTME: Centralized resource container handed to every route handler
// ABOUTME: Owns the store, repositories, recommendation engine, and recorder worker handle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! # Server Resources
//!
//! Built once at startup and shared as `Arc<ServerResources>`. Repositories
//! default to the `SQLite` implementations over [`Database`] and can be
//! swapped through the builder.

use crate::config::environment::ServerConfig;
use crate::database::repositories::{
    ProfileRepository, ProfileRepositoryImpl, RecipeRepository, RecipeRepositoryImpl,
    RecommendationRepository, RecommendationRepositoryImpl,
};
use crate::database::Database;
use crate::recommendations::{RecommendationEngine, RecommendationRecorder};
use std::sync::Arc;

/// Shared server resources
pub struct ServerResources {
    /// Store handle, used directly by the readiness probe
    pub database: Database,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Profile reads for routes outside the engine
    pub profiles: Arc<dyn ProfileRepository>,
    /// History reads for the listing route
    pub history: Arc<dyn RecommendationRepository>,
    /// Recommendation engine
    pub engine: Arc<RecommendationEngine>,
    /// Background writer for chosen recipes
    pub recorder: RecommendationRecorder,
}

/// Builder for [`ServerResources`]
#[derive(Default)]
pub struct ServerResourcesBuilder {
    database: Option<Database>,
    config: Option<Arc<ServerConfig>>,
    profiles: Option<Arc<dyn ProfileRepository>>,
    recipes: Option<Arc<dyn RecipeRepository>>,
    history: Option<Arc<dyn RecommendationRepository>>,
}

impl ServerResourcesBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database
    #[must_use]
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Set the server configuration
    #[must_use]
    pub fn with_config(mut self, config: Arc<ServerConfig>) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the profile repository
    #[must_use]
    pub fn with_profile_repository(mut self, profiles: Arc<dyn ProfileRepository>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Replace the recipe repository
    #[must_use]
    pub fn with_recipe_repository(mut self, recipes: Arc<dyn RecipeRepository>) -> Self {
        self.recipes = Some(recipes);
        self
    }

    /// Replace the recommendation history repository
    #[must_use]
    pub fn with_history_repository(mut self, history: Arc<dyn RecommendationRepository>) -> Self {
        self.history = Some(history);
        self
    }

    /// Build the resources and spawn the recorder worker.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the database or configuration is missing
    pub fn build(self) -> Result<ServerResources, &'static str> {
        let database = self.database.ok_or("Database is required")?;
        let config = self.config.ok_or("Server config is required")?;

        let profiles = self
            .profiles
            .unwrap_or_else(|| Arc::new(ProfileRepositoryImpl::new(database.clone())));
        let recipes = self
            .recipes
            .unwrap_or_else(|| Arc::new(RecipeRepositoryImpl::new(database.clone())));
        let history = self
            .history
            .unwrap_or_else(|| Arc::new(RecommendationRepositoryImpl::new(database.clone())));

        let engine = Arc::new(RecommendationEngine::new(
            Arc::clone(&profiles),
            recipes,
            Arc::clone(&history),
            config.recommendation.clone(),
        ));
        // The worker runs until every recorder handle is dropped
        let (recorder, _worker) = RecommendationRecorder::spawn(Arc::clone(&history));

        Ok(ServerResources {
            database,
            config,
            profiles,
            history,
            engine,
            recorder,
        })
    }

    /// Build the `ServerResources` wrapped in an `Arc`
    ///
    /// # Errors
    ///
    /// Returns an error if any required fields are missing
    pub fn build_arc(self) -> Result<Arc<ServerResources>, &'static str> {
        Ok(Arc::new(self.build()?))
    }
}
