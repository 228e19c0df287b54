// ABOUTME: Application constants for scoring, widening search, and dietary filtering
// ABOUTME: Single home for every tunable default the recommendation engine relies on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! Application-wide constants organized by domain

/// Weights and horizons used by the recipe scorer
pub mod scoring {
    /// Weight of the ingredient match ratio in the total score
    pub const INGREDIENT_MATCH_WEIGHT: f64 = 0.7;

    /// Weight of expiration urgency in the total score
    pub const EXPIRATION_PRIORITY_WEIGHT: f64 = 0.3;

    /// Ingredients expiring this many days out (or later) carry no urgency
    pub const EXPIRATION_HORIZON_DAYS: f64 = 30.0;

    /// Seconds in a day, for fractional day arithmetic
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Iterative widening search defaults
pub mod search {
    /// Extras tolerance used by the first scan
    pub const INITIAL_EXTRAS_THRESHOLD: u32 = 3;

    /// Widest extras tolerance ever tried (inclusive)
    pub const MAX_EXTRAS_THRESHOLD: u32 = 10;

    /// Wall-clock budget for one recommendation search
    pub const DEADLINE_SECS: u64 = 30;

    /// Number of recipes returned to the caller
    pub const RESULT_LIMIT: usize = 3;
}

/// Dietary lifestyle rules
pub mod lifestyle {
    /// Lifestyle id of the restrictive (plant-based) category
    pub const RESTRICTIVE_LIFESTYLE_ID: i64 = 1;

    /// Name fragments that disqualify a recipe for the restrictive lifestyle.
    /// Matched case-insensitively as substrings of the recipe name.
    pub const FORBIDDEN_NAME_TERMS: &[&str] = &[
        "beef", "chicken", "salmon", "fish", "pork", "bacon", "shrimp", "ham", "steak", "turkey",
        "sausage",
    ];
}

/// Service identity used in logs
pub mod service_names {
    /// Name of the HTTP server binary
    pub const PANTRY_CHEF_SERVER: &str = "pantry-chef-server";
}
