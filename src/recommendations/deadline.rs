// ABOUTME: Explicit search deadline threaded through every store lookup of a request
// ABOUTME: Wraps a tokio Instant so lookups can be abandoned once the budget is spent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use std::future::Future;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

/// Point in time after which a recommendation search stops widening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDeadline {
    at: Instant,
}

impl SearchDeadline {
    /// Deadline `budget` from now
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    /// Deadline at a fixed instant
    #[must_use]
    pub const fn at(at: Instant) -> Self {
        Self { at }
    }

    /// Whether the current time is past the deadline
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() > self.at
    }

    /// Time left before the deadline, zero once it has passed
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Drive `future` until it completes or the deadline passes.
    ///
    /// Returns `None` when the deadline won; the future is dropped.
    pub async fn bound<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        timeout_at(self.at, future).await.ok()
    }
}
