// ABOUTME: Database configuration types for SQLite connections
// ABOUTME: Parses DATABASE_URL into a typed location and sizes the connection pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Default on-disk database location
const DEFAULT_DATABASE_PATH: &str = "./data/pantry_chef.db";

/// Default pool size for file-backed databases
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the URL names an unsupported backend
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" || path_str.is_empty() {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            Err(AppError::config_invalid(format!(
                "Unsupported database URL scheme: {s}"
            )))
        } else if s == ":memory:" {
            Ok(Self::Memory)
        } else {
            // Fallback: treat as SQLite file path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Maximum pooled connections (in-memory databases always use one)
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// In-memory configuration used by tests and tooling
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            url: DatabaseUrl::Memory,
            max_connections: 1,
        }
    }

    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` or `DATABASE_MAX_CONNECTIONS` is invalid
    pub fn from_env() -> AppResult<Self> {
        let url = match env::var("DATABASE_URL") {
            Ok(raw) => DatabaseUrl::parse_url(&raw)?,
            Err(_) => DatabaseUrl::default(),
        };
        let max_connections = env_var_or(
            "DATABASE_MAX_CONNECTIONS",
            &DEFAULT_MAX_CONNECTIONS.to_string(),
        )
        .parse()
        .map_err(|e| AppError::config(format!("Invalid DATABASE_MAX_CONNECTIONS value: {e}")))?;

        Ok(Self {
            url,
            max_connections,
        })
    }

    /// Effective pool size; every in-memory connection is a distinct database
    #[must_use]
    pub fn pool_size(&self) -> u32 {
        if self.url.is_memory() {
            1
        } else {
            self.max_connections.max(1)
        }
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sqlite_urls() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/test.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/test.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("plain.db").unwrap().to_connection_string(),
            "sqlite:plain.db"
        );
    }

    #[test]
    fn test_bare_memory_is_in_memory() {
        let url = DatabaseUrl::parse_url(":memory:").unwrap();
        assert_eq!(url, DatabaseUrl::Memory);
        assert_eq!(url.to_connection_string(), "sqlite::memory:");
    }

    #[test]
    fn test_rejects_foreign_schemes() {
        assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
    }

    #[test]
    fn test_memory_pool_is_single_connection() {
        let config = DatabaseConfig {
            url: DatabaseUrl::Memory,
            max_connections: 8,
        };
        assert_eq!(config.pool_size(), 1);
        assert_eq!(DatabaseConfig::default().pool_size(), 5);
    }
}
