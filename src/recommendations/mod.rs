// ABOUTME: Recipe recommendation engine composing profile, candidates, allergy filter, and search
// ABOUTME: Returns up to N recipes that best use the user's soon-to-expire ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! # Recommendation Engine
//!
//! One request runs sequentially through:
//!
//! 1. [`pantry::Pantry`] validation (empty input is rejected before any read)
//! 2. [`profile::ProfileResolver`] (unknown user is `ResourceNotFound`)
//! 3. [`candidates::CandidateGenerator`] (tier, lifestyle, never-repeat)
//! 4. [`candidates::AllergyFilter`]
//! 5. [`search::WideningSearch`]
//! 6. [`selection::select_top`]
//!
//! A single [`deadline::SearchDeadline`] covers every store lookup from step 2
//! on. When it passes, the engine stops and reports a partial outcome instead
//! of an error. Persisting the result is the caller's job, through
//! [`recorder::RecommendationRecorder`].

/// Candidate generation and allergy filtering
pub mod candidates;
/// Request-wide search deadline
pub mod deadline;
/// Validated held ingredients
pub mod pantry;
/// Profile and allergy resolution
pub mod profile;
/// Background persistence of chosen recipes
pub mod recorder;
/// Recipe scoring
pub mod scoring;
/// Iterative widening search
pub mod search;
/// Top-N selection
pub mod selection;

pub use deadline::SearchDeadline;
pub use recorder::{RecommendationRecorder, RecorderStats};
pub use search::Completion;

use self::candidates::{AllergyFilter, CandidateGenerator};
use self::pantry::Pantry;
use self::profile::ProfileResolver;
use self::search::{SearchParams, WideningSearch};
use crate::config::RecommendationConfig;
use crate::database::repositories::{
    ProfileRepository, RecipeRepository, RecommendationRepository,
};
use crate::errors::AppResult;
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use pantry_chef_core::models::{AvailableIngredient, ScoredRecipe, UserId};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::instrument;

/// Input of one recommendation search
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    /// Requesting user
    pub user_id: UserId,
    /// Ingredients currently held
    pub ingredients: Vec<AvailableIngredient>,
}

/// Ranked result of one search
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOutcome {
    /// Best recipes, highest score first
    pub recipes: Vec<ScoredRecipe>,
    /// Whether the search finished within the deadline
    pub completion: Completion,
    /// Widening rounds started
    pub rounds: u32,
}

impl RecommendationOutcome {
    fn expired() -> Self {
        Self {
            recipes: Vec::new(),
            completion: Completion::Partial,
            rounds: 0,
        }
    }
}

/// Stateless engine shared by every request
pub struct RecommendationEngine {
    resolver: ProfileResolver,
    generator: CandidateGenerator,
    allergy_filter: AllergyFilter,
    search: WideningSearch,
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// Wire the engine to its repositories
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        recipes: Arc<dyn RecipeRepository>,
        history: Arc<dyn RecommendationRepository>,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            resolver: ProfileResolver::new(profiles),
            generator: CandidateGenerator::new(
                Arc::clone(&recipes),
                history,
                config.restrictive_lifestyle_id,
            ),
            allergy_filter: AllergyFilter::new(Arc::clone(&recipes)),
            search: WideningSearch::new(recipes, SearchParams::from(&config)),
            config,
        }
    }

    /// Search settings in use
    #[must_use]
    pub const fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Recommend recipes with the configured deadline starting now
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty ingredient list,
    /// `ResourceNotFound` for an unknown user, and a database error if any
    /// required read fails
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> AppResult<RecommendationOutcome> {
        let deadline = SearchDeadline::after(self.config.deadline);
        self.recommend_with_deadline(request, deadline).await
    }

    /// Recommend recipes under an explicit deadline
    ///
    /// # Errors
    ///
    /// Same as [`Self::recommend`]
    #[instrument(skip_all, fields(user_id = request.user_id))]
    pub async fn recommend_with_deadline(
        &self,
        request: RecommendationRequest,
        deadline: SearchDeadline,
    ) -> AppResult<RecommendationOutcome> {
        let started = Instant::now();
        let user_id = request.user_id;
        let pantry = Pantry::new(request.ingredients)?;
        let now = Utc::now();

        let outcome = self.run(user_id, &pantry, now, &deadline).await?;

        AppLogger::log_recommendation(
            user_id,
            outcome.recipes.len(),
            outcome.rounds,
            outcome.completion.is_complete(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(outcome)
    }

    async fn run(
        &self,
        user_id: UserId,
        pantry: &Pantry,
        now: DateTime<Utc>,
        deadline: &SearchDeadline,
    ) -> AppResult<RecommendationOutcome> {
        let Some(resolved) = self.resolver.resolve(user_id, deadline).await? else {
            return Ok(RecommendationOutcome::expired());
        };
        let Some(candidates) = self.generator.generate(&resolved, deadline).await? else {
            return Ok(RecommendationOutcome::expired());
        };

        let filtered = self
            .allergy_filter
            .filter(candidates, &resolved.allergy_ids, deadline)
            .await?;
        if !filtered.complete {
            return Ok(RecommendationOutcome::expired());
        }

        let result = self
            .search
            .run(&filtered.recipes, pantry, now, deadline)
            .await?;

        Ok(RecommendationOutcome {
            recipes: selection::select_top(result.scored, self.config.result_limit),
            completion: result.completion,
            rounds: result.rounds,
        })
    }
}
