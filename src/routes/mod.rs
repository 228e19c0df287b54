// ABOUTME: Route module organization for Pantry Chef HTTP endpoints
// ABOUTME: Groups thin handlers by domain; each delegates to the engine or repositories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! HTTP routes

/// Allergy registration and listing routes
pub mod allergies;
/// Health check and readiness routes
pub mod health;
/// Recommendation and history routes
pub mod recommendations;

pub use allergies::AllergyRoutes;
pub use health::HealthRoutes;
pub use recommendations::RecommendationRoutes;
