// ABOUTME: Profile resolver loading a user's lifestyle, skill tier, and allergy set
// ABOUTME: Unknown users fail with NotFound before any search work starts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::deadline::SearchDeadline;
use crate::database::repositories::ProfileRepository;
use crate::errors::{AppError, AppResult};
use pantry_chef_core::models::{IngredientId, UserId, UserProfile};
use std::collections::HashSet;
use std::sync::Arc;

/// Profile snapshot plus the ingredients the user must never be served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    /// Lifestyle and tier snapshot
    pub profile: UserProfile,
    /// Allergenic ingredient ids
    pub allergy_ids: HashSet<IngredientId>,
}

/// Reads the profile and allergies of the requesting user
pub struct ProfileResolver {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileResolver {
    /// Create a resolver over a profile repository
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Resolve `user_id`, or `Ok(None)` if the deadline passed mid-lookup
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user and a database error if
    /// either read fails
    pub async fn resolve(
        &self,
        user_id: UserId,
        deadline: &SearchDeadline,
    ) -> AppResult<Option<ResolvedProfile>> {
        let Some(profile) = deadline.bound(self.profiles.get_profile(user_id)).await else {
            return Ok(None);
        };
        let profile = profile?.ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;

        let Some(allergy_ids) = deadline.bound(self.profiles.get_allergy_ids(user_id)).await
        else {
            return Ok(None);
        };

        Ok(Some(ResolvedProfile {
            profile,
            allergy_ids: allergy_ids?,
        }))
    }
}
