// ABOUTME: Perishable ingredients a user holds, supplied per recommendation request
// ABOUTME: Provides expiration-date parsing for RFC 3339 timestamps and plain dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::IngredientId;
use crate::constants::scoring::SECONDS_PER_DAY;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An ingredient the user currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableIngredient {
    /// Ingredient id
    pub ingredient_id: IngredientId,
    /// When the held ingredient spoils
    pub expiration_date: DateTime<Utc>,
}

impl AvailableIngredient {
    /// Fractional days from `now` until this ingredient expires (negative once expired)
    #[must_use]
    pub fn days_remaining(&self, now: DateTime<Utc>) -> f64 {
        let seconds = (self.expiration_date - now).num_milliseconds() as f64 / 1000.0;
        seconds / SECONDS_PER_DAY
    }
}

/// Parse an expiration date given either as RFC 3339 or as `YYYY-MM-DD` (midnight UTC)
#[must_use]
pub fn parse_expiration_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
