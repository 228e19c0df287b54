// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Handles environment configs, store location, and recommendation search tunables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! Configuration module for the Pantry Chef server
//!
//! All configuration comes from environment variables; command-line flags on
//! the server binary may override individual values.

/// Store location and pool sizing
pub mod database;
/// Server and recommendation configuration from environment variables
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{RecommendationConfig, ServerConfig};
