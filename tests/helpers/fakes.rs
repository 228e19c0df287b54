// ABOUTME: In-memory repository fakes for driving the engine without SQLite
// ABOUTME: Supports per-lookup latency, injected failures, and call counting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

#![allow(dead_code)]

use async_trait::async_trait;
use pantry_chef_core::errors::DatabaseError;
use pantry_chef_core::models::{
    CandidateFilter, IngredientId, Recipe, RecipeId, Recommendation, RecommendedRecipe, UserId,
    UserProfile,
};
use pantry_chef_server::database::repositories::{
    ProfileRepository, RecipeRepository, RecommendationRepository,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Build a catalog recipe with empty text fields
pub fn recipe(id: RecipeId, name: &str, lifestyle_id: i64, tier: i64) -> Recipe {
    Recipe {
        id,
        name: name.to_owned(),
        ingredients_text: String::new(),
        description: String::new(),
        steps: String::new(),
        calories: 0.0,
        minutes: 0,
        lifestyle_id,
        experience_level_id: tier,
    }
}

/// Profiles and allergies held in memory
#[derive(Default)]
pub struct FakeProfiles {
    pub profiles: HashMap<UserId, UserProfile>,
    pub allergies: HashMap<UserId, HashSet<IngredientId>>,
    pub calls: AtomicUsize,
}

impl FakeProfiles {
    pub fn with_user(mut self, profile: UserProfile) -> Self {
        self.profiles.insert(profile.id, profile);
        self
    }

    pub fn with_allergy(mut self, user_id: UserId, ingredient_id: IngredientId) -> Self {
        self.allergies
            .entry(user_id)
            .or_default()
            .insert(ingredient_id);
        self
    }
}

#[async_trait]
impl ProfileRepository for FakeProfiles {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.profiles.get(&user_id).copied())
    }

    async fn get_allergy_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<IngredientId>, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.allergies.get(&user_id).cloned().unwrap_or_default())
    }
}

/// Recipe catalog with optional per-lookup latency and a failing recipe id
#[derive(Default)]
pub struct FakeRecipes {
    pub recipes: Vec<Recipe>,
    pub ingredients: HashMap<RecipeId, Vec<IngredientId>>,
    pub lookup_delay: Option<Duration>,
    pub failing_recipe: Option<RecipeId>,
    pub ignore_filter: bool,
    pub lookups: AtomicUsize,
}

impl FakeRecipes {
    pub fn with_recipe(mut self, recipe: Recipe, ingredient_ids: &[IngredientId]) -> Self {
        self.ingredients.insert(recipe.id, ingredient_ids.to_vec());
        self.recipes.push(recipe);
        self
    }

    pub const fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = Some(delay);
        self
    }

    pub const fn failing_on(mut self, recipe_id: RecipeId) -> Self {
        self.failing_recipe = Some(recipe_id);
        self
    }

    /// Return every recipe regardless of the filter, like a store that ignores predicates
    pub const fn ignoring_filter(mut self) -> Self {
        self.ignore_filter = true;
        self
    }
}

#[async_trait]
impl RecipeRepository for FakeRecipes {
    async fn get_eligible_recipes(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<Recipe>, DatabaseError> {
        let mut recipes: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|recipe| self.ignore_filter || filter.admits(recipe))
            .cloned()
            .collect();
        recipes.sort_by_key(|recipe| recipe.id);
        Ok(recipes)
    }

    async fn get_recipe_ingredient_ids(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<IngredientId>, DatabaseError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_recipe == Some(recipe_id) {
            return Err(DatabaseError::QueryError {
                context: format!("ingredients of recipe {recipe_id}"),
            });
        }
        Ok(self.ingredients.get(&recipe_id).cloned().unwrap_or_default())
    }
}

/// Append-only history kept in a mutex-guarded vector
#[derive(Default)]
pub struct FakeHistory {
    pub rows: Mutex<Vec<Recommendation>>,
    pub fail_inserts: bool,
}

impl FakeHistory {
    pub fn with_past(self, user_id: UserId, recipe_id: RecipeId) -> Self {
        self.rows
            .lock()
            .unwrap()
            .push(Recommendation::now(user_id, recipe_id));
        self
    }

    pub fn recipe_ids_for(&self, user_id: UserId) -> Vec<RecipeId> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| row.recipe_id)
            .collect()
    }
}

#[async_trait]
impl RecommendationRepository for FakeHistory {
    async fn get_recommended_recipe_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<RecipeId>, DatabaseError> {
        Ok(self.recipe_ids_for(user_id).into_iter().collect())
    }

    async fn insert(&self, recommendation: &Recommendation) -> Result<(), DatabaseError> {
        if self.fail_inserts {
            return Err(DatabaseError::QueryError {
                context: "insert rejected".to_owned(),
            });
        }
        self.rows.lock().unwrap().push(*recommendation);
        Ok(())
    }

    async fn list_history(&self, _user_id: UserId) -> Result<Vec<RecommendedRecipe>, DatabaseError> {
        Ok(Vec::new())
    }
}
