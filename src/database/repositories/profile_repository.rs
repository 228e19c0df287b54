// ABOUTME: Profile repository implementation over the SQLite store
// ABOUTME: Resolves user profile snapshots and allergy ingredient sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::ProfileRepository;
use crate::database::{Database, DatabaseError};
use async_trait::async_trait;
use pantry_chef_core::models::{IngredientId, UserId, UserProfile};
use std::collections::HashSet;

/// `SQLite` implementation of `ProfileRepository`
pub struct ProfileRepositoryImpl {
    db: Database,
}

impl ProfileRepositoryImpl {
    /// Create a new `ProfileRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileRepositoryImpl {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, DatabaseError> {
        self.db
            .get_user_profile(user_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn get_allergy_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<IngredientId>, DatabaseError> {
        self.db
            .get_user_allergy_ids(user_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }
}
