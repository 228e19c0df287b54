// ABOUTME: Main library entry point for the Pantry Chef recommendation server
// ABOUTME: Wires configuration, storage, the recommendation engine, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

#![deny(unsafe_code)]

//! # Pantry Chef Server
//!
//! An HTTP service that recommends up to three recipes which make the best use
//! of the perishable ingredients a user currently holds, before they spoil.
//!
//! ## Architecture
//!
//! - **Config**: environment-driven server, store, and search settings
//! - **Database**: `SQLite` store with repository traits over it
//! - **Recommendations**: profile resolution, candidate generation, allergy
//!   filtering, scoring, deadline-bounded widening search, and top-N selection
//! - **Recorder**: background queue that persists chosen recipes after the response
//! - **Routes**: axum handlers for recommendations, history, and health
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pantry_chef_server::config::environment::ServerConfig;
//! use pantry_chef_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Pantry Chef configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration management from environment variables
pub mod config;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// `SQLite` store, schema, and repositories
pub mod database;

/// HTTP middleware for request ids, tracing spans, and CORS
pub mod middleware;

/// Recipe recommendation engine
pub mod recommendations;

/// Shared server resources handed to every route
pub mod resources;

/// HTTP routes
pub mod routes;

/// Router assembly and HTTP serving
pub mod server;

pub use pantry_chef_core::{constants, models};
