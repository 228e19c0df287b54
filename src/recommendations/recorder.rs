// ABOUTME: Background recorder persisting chosen recipes after the response is built
// ABOUTME: Single worker drains an unbounded queue with one best-effort insert per row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

//! # Recommendation Recorder
//!
//! The request path calls [`RecommendationRecorder::submit`] and returns
//! immediately. A worker task owns the writes: each row gets exactly one
//! insert attempt, failures are logged and counted, nothing is retried, and
//! nothing flows back to the caller.

use crate::database::repositories::RecommendationRepository;
use crate::logging::AppLogger;
use pantry_chef_core::models::{RecipeId, Recommendation, UserId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

enum RecorderJob {
    Record(Vec<Recommendation>),
    Flush(oneshot::Sender<()>),
}

#[derive(Debug, Default)]
struct RecorderCounters {
    written: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time view of the recorder counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecorderStats {
    /// Rows inserted
    pub written: u64,
    /// Rows whose insert failed or that could not be queued
    pub failed: u64,
}

/// Handle to the recorder worker; cheap to clone
#[derive(Clone)]
pub struct RecommendationRecorder {
    sender: mpsc::UnboundedSender<RecorderJob>,
    counters: Arc<RecorderCounters>,
}

impl RecommendationRecorder {
    /// Spawn the worker on the current tokio runtime
    #[must_use]
    pub fn spawn(history: Arc<dyn RecommendationRepository>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let counters = Arc::new(RecorderCounters::default());
        let handle = tokio::spawn(run_worker(receiver, history, Arc::clone(&counters)));
        (Self { sender, counters }, handle)
    }

    /// Queue one history row per recipe; never blocks
    pub fn submit(&self, user_id: UserId, recipe_ids: &[RecipeId]) {
        if recipe_ids.is_empty() {
            return;
        }
        let rows: Vec<Recommendation> = recipe_ids
            .iter()
            .map(|recipe_id| Recommendation::now(user_id, *recipe_id))
            .collect();
        let count = rows.len() as u64;

        if self.sender.send(RecorderJob::Record(rows)).is_err() {
            warn!(user_id, rows = count, "Recorder worker is gone; dropping recommendations");
            self.counters.failed.fetch_add(count, Ordering::Relaxed);
        }
    }

    /// Wait until every job queued before this call has been processed
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.sender.send(RecorderJob::Flush(done_tx)).is_ok() {
            // A dropped sender means the worker stopped; nothing left to wait for
            let _ = done_rx.await;
        }
    }

    /// Current counters
    #[must_use]
    pub fn stats(&self) -> RecorderStats {
        RecorderStats {
            written: self.counters.written.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

async fn run_worker(
    mut receiver: mpsc::UnboundedReceiver<RecorderJob>,
    history: Arc<dyn RecommendationRepository>,
    counters: Arc<RecorderCounters>,
) {
    while let Some(job) = receiver.recv().await {
        match job {
            RecorderJob::Record(rows) => {
                for row in rows {
                    match history.insert(&row).await {
                        Ok(()) => {
                            counters.written.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            AppLogger::log_record_failure(row.user_id, row.recipe_id, &e.to_string());
                            counters.failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            }
            RecorderJob::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Recommendation recorder stopped");
}
