// ABOUTME: Allergy route handlers for registering and listing a user's excluded ingredients
// ABOUTME: Writes go straight to the store; the engine picks them up on the next request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! Allergy routes

use crate::{
    errors::{AppError, AppResult},
    middleware::request_id,
    resources::ServerResources,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use pantry_chef_core::models::{IngredientId, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Body of `POST /api/users/:user_id/allergies`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAllergyRequest {
    /// Ingredient the user must never be served
    #[serde(default, alias = "ingredient_id")]
    pub ingredient_id: Option<IngredientId>,
}

/// A user's registered allergies
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergiesResponse {
    /// Owner
    pub user_id: UserId,
    /// Excluded ingredient ids, ascending
    pub ingredient_ids: Vec<IngredientId>,
}

/// Allergy routes handler
pub struct AllergyRoutes;

impl AllergyRoutes {
    /// Create all allergy routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/allergies",
                get(Self::list_allergies).post(Self::add_allergy),
            )
            .with_state(resources)
    }

    /// Register an allergy; repeating it is a no-op
    async fn add_allergy(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<UserId>,
        headers: HeaderMap,
        payload: Result<Json<AddAllergyRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let with_request_id = |error: AppError| match request_id(&headers) {
            Some(id) => error.with_request_id(id),
            None => error,
        };

        let Json(body) = payload
            .map_err(|rejection| with_request_id(AppError::invalid_format(rejection.body_text())))?;
        let ingredient_id = body
            .ingredient_id
            .ok_or_else(|| with_request_id(AppError::missing_field("ingredientId")))?;

        Self::ensure_user(&resources, user_id)
            .await
            .map_err(with_request_id)?;
        if !resources
            .database
            .ingredient_exists(ingredient_id)
            .await
            .map_err(with_request_id)?
        {
            return Err(with_request_id(AppError::not_found(format!(
                "Ingredient {ingredient_id}"
            ))));
        }

        resources
            .database
            .add_user_allergy(user_id, ingredient_id)
            .await
            .map_err(with_request_id)?;
        info!(user_id, ingredient_id, "Allergy registered");

        let response = Self::load(&resources, user_id)
            .await
            .map_err(with_request_id)?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// List a user's allergies
    async fn list_allergies(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<UserId>,
    ) -> Result<Response, AppError> {
        Self::ensure_user(&resources, user_id).await?;
        let response = Self::load(&resources, user_id).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn ensure_user(resources: &ServerResources, user_id: UserId) -> AppResult<()> {
        if resources.profiles.get_profile(user_id).await?.is_none() {
            return Err(AppError::not_found(format!("User {user_id}")));
        }
        Ok(())
    }

    async fn load(resources: &ServerResources, user_id: UserId) -> AppResult<AllergiesResponse> {
        let mut ingredient_ids: Vec<IngredientId> = resources
            .database
            .get_user_allergy_ids(user_id)
            .await?
            .into_iter()
            .collect();
        ingredient_ids.sort_unstable();
        Ok(AllergiesResponse {
            user_id,
            ingredient_ids,
        })
    }
}
