// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Loads server, store, and recommendation search settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! Environment-based configuration management for production deployment

use super::database::DatabaseConfig;
use crate::constants::{lifestyle, search};
use crate::errors::{AppError, AppResult};
use pantry_chef_core::models::LifestyleId;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default outer request timeout, comfortably above the search deadline
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Tunables for the recommendation search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Wall-clock budget measured from request start
    pub deadline: Duration,
    /// Extras tolerance of the first scan
    pub initial_extras_threshold: u32,
    /// Widest extras tolerance tried (inclusive)
    pub max_extras_threshold: u32,
    /// Number of recipes returned
    pub result_limit: usize,
    /// Lifestyle id whose users get the forbidden-name-term rule
    pub restrictive_lifestyle_id: LifestyleId,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(search::DEADLINE_SECS),
            initial_extras_threshold: search::INITIAL_EXTRAS_THRESHOLD,
            max_extras_threshold: search::MAX_EXTRAS_THRESHOLD,
            result_limit: search::RESULT_LIMIT,
            restrictive_lifestyle_id: lifestyle::RESTRICTIVE_LIFESTYLE_ID,
        }
    }
}

impl RecommendationConfig {
    /// Load search settings from environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable does not parse or the result fails validation
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            deadline: Duration::from_secs(parse_env_or(
                "RECOMMENDATION_DEADLINE_SECS",
                search::DEADLINE_SECS,
            )?),
            initial_extras_threshold: parse_env_or(
                "RECOMMENDATION_INITIAL_EXTRAS",
                search::INITIAL_EXTRAS_THRESHOLD,
            )?,
            max_extras_threshold: parse_env_or(
                "RECOMMENDATION_MAX_EXTRAS",
                search::MAX_EXTRAS_THRESHOLD,
            )?,
            result_limit: parse_env_or("RECOMMENDATION_LIMIT", search::RESULT_LIMIT)?,
            restrictive_lifestyle_id: parse_env_or(
                "RESTRICTIVE_LIFESTYLE_ID",
                lifestyle::RESTRICTIVE_LIFESTYLE_ID,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the search cannot run with
    ///
    /// # Errors
    ///
    /// Returns an error for a zero deadline, a zero result limit, or an
    /// initial extras threshold above the maximum
    pub fn validate(&self) -> AppResult<()> {
        if self.deadline.is_zero() {
            return Err(AppError::config_invalid(
                "RECOMMENDATION_DEADLINE_SECS must be greater than zero",
            ));
        }
        if self.result_limit == 0 {
            return Err(AppError::config_invalid(
                "RECOMMENDATION_LIMIT must be greater than zero",
            ));
        }
        if self.initial_extras_threshold > self.max_extras_threshold {
            return Err(AppError::config_invalid(format!(
                "RECOMMENDATION_INITIAL_EXTRAS ({}) exceeds RECOMMENDATION_MAX_EXTRAS ({})",
                self.initial_extras_threshold, self.max_extras_threshold
            )));
        }
        Ok(())
    }

    /// Number of widening rounds the search may run
    #[must_use]
    pub const fn max_rounds(&self) -> u32 {
        self.max_extras_threshold - self.initial_extras_threshold + 1
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Store settings
    pub database: DatabaseConfig,
    /// Recommendation search settings
    pub recommendation: RecommendationConfig,
    /// Outer timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Comma-separated CORS origins, or `*` for any
    pub cors_allowed_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            host: "127.0.0.1".to_owned(),
            database: DatabaseConfig::default(),
            recommendation: RecommendationConfig::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cors_allowed_origins: "*".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is malformed or the search settings are invalid
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: parse_env_or("HTTP_PORT", DEFAULT_HTTP_PORT)?,
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned()),
            database: DatabaseConfig::from_env()?,
            recommendation: RecommendationConfig::from_env()?,
            request_timeout: Duration::from_secs(parse_env_or(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_owned()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject a request timeout that would cut the search off before its deadline
    ///
    /// A partial result is only observable when the outer timeout outlasts
    /// the search deadline.
    ///
    /// # Errors
    ///
    /// Returns an error if the search settings are invalid or the request
    /// timeout does not exceed the search deadline
    pub fn validate(&self) -> AppResult<()> {
        self.recommendation.validate()?;
        if self.request_timeout <= self.recommendation.deadline {
            return Err(AppError::config_invalid(format!(
                "REQUEST_TIMEOUT_SECS ({}s) must exceed RECOMMENDATION_DEADLINE_SECS ({}s)",
                self.request_timeout.as_secs(),
                self.recommendation.deadline.as_secs()
            )));
        }
        Ok(())
    }

    /// One-line human-readable summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Pantry Chef configuration: http={}:{} database={} deadline={}s extras={}..={} limit={} restrictive_lifestyle={}",
            self.host,
            self.http_port,
            self.database.url,
            self.recommendation.deadline.as_secs(),
            self.recommendation.initial_extras_threshold,
            self.recommendation.max_extras_threshold,
            self.recommendation.result_limit,
            self.recommendation.restrictive_lifestyle_id,
        )
    }
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_search_constants() {
        let config = RecommendationConfig::default();
        assert_eq!(config.deadline, Duration::from_secs(30));
        assert_eq!(config.initial_extras_threshold, 3);
        assert_eq!(config.max_extras_threshold, 10);
        assert_eq!(config.max_rounds(), 8);
        assert_eq!(config.result_limit, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let config = RecommendationConfig {
            initial_extras_threshold: 11,
            ..RecommendationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_deadline_and_limit() {
        let zero_deadline = RecommendationConfig {
            deadline: Duration::ZERO,
            ..RecommendationConfig::default()
        };
        let zero_limit = RecommendationConfig {
            result_limit: 0,
            ..RecommendationConfig::default()
        };
        assert!(zero_deadline.validate().is_err());
        assert!(zero_limit.validate().is_err());
    }

    #[test]
    fn test_server_validate_requires_timeout_above_deadline() {
        assert!(ServerConfig::default().validate().is_ok());

        let cut_short = ServerConfig {
            request_timeout: Duration::from_secs(10),
            ..ServerConfig::default()
        };
        let err = cut_short.validate().unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ConfigInvalid);
        assert!(err.message.contains("REQUEST_TIMEOUT_SECS"));

        let inverted = ServerConfig {
            recommendation: RecommendationConfig {
                initial_extras_threshold: 11,
                ..RecommendationConfig::default()
            },
            ..ServerConfig::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_summary_mentions_key_settings() {
        let summary = ServerConfig::default().summary();
        assert!(summary.contains("8081"));
        assert!(summary.contains("deadline=30s"));
    }
}
