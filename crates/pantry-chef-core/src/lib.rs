// ABOUTME: Core types and constants for the Pantry Chef recommendation platform
// ABOUTME: Foundation crate with error handling, domain models, and scoring constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

#![deny(unsafe_code)]

//! # Pantry Chef Core
//!
//! Foundation crate providing shared types and constants for the Pantry Chef
//! recommendation server. It changes infrequently so the server crate gets
//! incremental compilation benefits.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Scoring weights, widening parameters, and dietary term lists
//! - **models**: Users, recipes, held ingredients, scored results, and history rows

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profiles, recipes, ingredients, recommendations)
pub mod models;
