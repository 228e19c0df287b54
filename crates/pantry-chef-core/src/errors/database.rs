// ABOUTME: Structured error types for relational store operations
// ABOUTME: Provides domain-specific errors with context for better error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use thiserror::Error;

/// Errors raised by the store and its repositories
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Could not open or reach the database
    #[error("Database connection failed: {message}")]
    ConnectionError {
        /// Driver message
        message: String,
    },

    /// A query failed to execute
    #[error("Database query failed: {context}")]
    QueryError {
        /// What the query was doing when it failed
        context: String,
    },

    /// Schema creation failed
    #[error("Database migration failed: {context}")]
    MigrationError {
        /// Which migration step failed
        context: String,
    },

    /// A stored value could not be decoded into a domain type
    #[error("Invalid stored data in {field}: {reason}")]
    InvalidData {
        /// Column or field name
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionError {
                    message: error.to_string(),
                }
            }
            sqlx::Error::ColumnDecode { index, source } => Self::InvalidData {
                field: index,
                reason: source.to_string(),
            },
            other => Self::QueryError {
                context: other.to_string(),
            },
        }
    }
}
