// ABOUTME: Validated set of ingredients a user currently holds
// ABOUTME: The engine refuses to search against an empty pantry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use crate::errors::{AppError, AppResult};
use pantry_chef_core::models::{AvailableIngredient, IngredientId};
use std::collections::HashSet;

/// Non-empty list of held ingredients with their expiration dates
#[derive(Debug, Clone)]
pub struct Pantry {
    entries: Vec<AvailableIngredient>,
    held_ids: HashSet<IngredientId>,
}

impl Pantry {
    /// Validate and index the supplied ingredients
    ///
    /// # Errors
    ///
    /// Returns a validation error if `entries` is empty
    pub fn new(entries: Vec<AvailableIngredient>) -> AppResult<Self> {
        if entries.is_empty() {
            return Err(AppError::invalid_input(
                "ingredients must contain at least one entry",
            ));
        }
        let held_ids = entries.iter().map(|entry| entry.ingredient_id).collect();
        Ok(Self { entries, held_ids })
    }

    /// Every supplied entry, duplicates included
    #[must_use]
    pub fn entries(&self) -> &[AvailableIngredient] {
        &self.entries
    }

    /// Whether the user holds at least one unit of `ingredient_id`
    #[must_use]
    pub fn holds(&self, ingredient_id: IngredientId) -> bool {
        self.held_ids.contains(&ingredient_id)
    }
}
