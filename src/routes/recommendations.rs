// ABOUTME: Recommendation route handlers for recipe suggestions and suggestion history
// ABOUTME: Validates request bodies, runs the engine, and queues chosen recipes for recording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! Recommendation routes
//!
//! `POST /api/recommendations` answers 200 when the search completed and 206
//! when the deadline cut it short. The chosen recipe ids are handed to the
//! recorder before the response is returned; the handler never waits on the
//! write.

use crate::{
    errors::{AppError, AppResult},
    middleware::request_id,
    models::{pantry::parse_expiration_date, AvailableIngredient, RecommendedRecipe, ScoredRecipe},
    recommendations::RecommendationRequest,
    resources::ServerResources,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pantry_chef_core::models::UserId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /api/recommendations`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// Requesting user
    #[serde(default, alias = "user_id")]
    pub user_id: Option<UserId>,
    /// Held ingredients
    #[serde(default)]
    pub ingredients: Option<Vec<IngredientInput>>,
}

/// One held ingredient as sent by the client
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientInput {
    /// Ingredient id
    #[serde(default, alias = "ingredient_id")]
    pub ingredient_id: Option<i64>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(default, alias = "expiration_date")]
    pub expiration_date: Option<String>,
}

impl RecommendRequest {
    /// Check required fields and parse dates
    ///
    /// # Errors
    ///
    /// Returns a 400-class error naming the first offending field
    pub fn validate(self) -> AppResult<RecommendationRequest> {
        let user_id = self.user_id.ok_or_else(|| AppError::missing_field("userId"))?;
        let inputs = self
            .ingredients
            .ok_or_else(|| AppError::missing_field("ingredients"))?;
        if inputs.is_empty() {
            return Err(AppError::invalid_input(
                "ingredients must contain at least one entry",
            ));
        }

        let ingredients = inputs
            .into_iter()
            .enumerate()
            .map(|(index, input)| {
                let ingredient_id = input.ingredient_id.ok_or_else(|| {
                    AppError::missing_field(&format!("ingredients[{index}].ingredientId"))
                })?;
                let raw = input.expiration_date.ok_or_else(|| {
                    AppError::missing_field(&format!("ingredients[{index}].expirationDate"))
                })?;
                let expiration_date = parse_expiration_date(&raw).ok_or_else(|| {
                    AppError::invalid_format(format!(
                        "ingredients[{index}].expirationDate '{raw}' is not RFC 3339 or YYYY-MM-DD"
                    ))
                })?;
                Ok(AvailableIngredient {
                    ingredient_id,
                    expiration_date,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(RecommendationRequest {
            user_id,
            ingredients,
        })
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// One recommended recipe
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    /// Recipe id
    pub recipe_id: i64,
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
    /// Weighted score in `[0, 1]`
    pub total_score: f64,
}

impl From<ScoredRecipe> for RecipeResponse {
    fn from(scored: ScoredRecipe) -> Self {
        let recipe = scored.recipe;
        Self {
            recipe_id: recipe.id,
            name: recipe.name,
            ingredients_text: recipe.ingredients_text,
            description: recipe.description,
            steps: recipe.steps,
            calories: recipe.calories,
            minutes: recipe.minutes,
            total_score: scored.total_score,
        }
    }
}

/// Body of a recommendation response
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    /// Up to the configured limit, best first
    pub recipes: Vec<RecipeResponse>,
}

/// One past suggestion
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    /// Recipe id
    pub recipe_id: i64,
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
    /// When it was suggested (RFC 3339)
    pub recommended_at: String,
}

impl From<RecommendedRecipe> for HistoryEntryResponse {
    fn from(entry: RecommendedRecipe) -> Self {
        let recipe = entry.recipe;
        Self {
            recipe_id: recipe.id,
            name: recipe.name,
            ingredients_text: recipe.ingredients_text,
            description: recipe.description,
            steps: recipe.steps,
            calories: recipe.calories,
            minutes: recipe.minutes,
            recommended_at: entry.recommended_at.to_rfc3339(),
        }
    }
}

/// Body of a history listing
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Past suggestions, newest first
    pub recipes: Vec<HistoryEntryResponse>,
    /// Number of entries
    pub total: usize,
}

// ============================================================================
// Recommendation Routes
// ============================================================================

/// Recommendation routes handler
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recommendations", post(Self::recommend))
            .route(
                "/api/users/:user_id/recommendations",
                get(Self::list_history),
            )
            .with_state(resources)
    }

    /// Recommend recipes for the supplied pantry
    async fn recommend(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<RecommendRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let with_request_id = |error: AppError| match request_id(&headers) {
            Some(id) => error.with_request_id(id),
            None => error,
        };

        let Json(body) =
            payload.map_err(|rejection| with_request_id(AppError::invalid_format(rejection.body_text())))?;
        let request = body.validate().map_err(with_request_id)?;
        let user_id = request.user_id;

        let outcome = resources
            .engine
            .recommend(request)
            .await
            .map_err(with_request_id)?;

        let recipe_ids: Vec<i64> = outcome.recipes.iter().map(|s| s.recipe.id).collect();
        resources.recorder.submit(user_id, &recipe_ids);

        let status = if outcome.completion.is_complete() {
            StatusCode::OK
        } else {
            StatusCode::PARTIAL_CONTENT
        };
        let response = RecommendationsResponse {
            recipes: outcome.recipes.into_iter().map(RecipeResponse::from).collect(),
        };

        Ok((status, Json(response)).into_response())
    }

    /// List recipes previously recommended to a user
    async fn list_history(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<UserId>,
    ) -> Result<Response, AppError> {
        if resources.profiles.get_profile(user_id).await?.is_none() {
            return Err(AppError::not_found(format!("User {user_id}")));
        }

        let entries = resources.history.list_history(user_id).await?;
        let response = HistoryResponse {
            total: entries.len(),
            recipes: entries.into_iter().map(HistoryEntryResponse::from).collect(),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
