// ABOUTME: Error types re-exported from pantry-chef-core for crate-local imports
// ABOUTME: Keeps `crate::errors::AppError` paths stable for server modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

pub use pantry_chef_core::errors::*;
