//! The crawl controller: one sequential, resumable sweep over the id list.
//!
//! Per-id failures are logged and skipped; only an unreachable id list or a
//! failed checkpoint write aborts the run, because continuing past either
//! would silently lose progress.

use crate::modules::anime::application::ports::{AnimeCache, AnimeStore};
use crate::modules::anime::application::service::ttl_for_status;
use crate::modules::anime::domain::services::reconciliation::Reconcile;
use crate::modules::anime::domain::services::save_policy::SavePolicy;
use crate::modules::crawler::checkpoint::CheckpointStore;
use crate::modules::crawler::id_source::IdSource;
use crate::shared::errors::AppResult;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    Saved,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub processed: usize,
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl CrawlSummary {
    fn record(&mut self, outcome: CrawlOutcome) {
        self.processed += 1;
        match outcome {
            CrawlOutcome::Saved => self.saved += 1,
            CrawlOutcome::Skipped => self.skipped += 1,
            CrawlOutcome::Failed => self.failed += 1,
        }
    }
}

pub struct CrawlController {
    ids: Arc<dyn IdSource>,
    reconciler: Arc<dyn Reconcile>,
    store: Arc<dyn AnimeStore>,
    cache: Arc<dyn AnimeCache>,
    checkpoint: Arc<dyn CheckpointStore>,
    policy: SavePolicy,
    sweep_delay: Duration,
}

impl CrawlController {
    pub fn new(
        ids: Arc<dyn IdSource>,
        reconciler: Arc<dyn Reconcile>,
        store: Arc<dyn AnimeStore>,
        cache: Arc<dyn AnimeCache>,
        checkpoint: Arc<dyn CheckpointStore>,
        policy: SavePolicy,
        sweep_delay: Duration,
    ) -> Self {
        Self {
            ids,
            reconciler,
            store,
            cache,
            checkpoint,
            policy,
            sweep_delay,
        }
    }

    /// Run one sweep: fetch the id list, resume after the checkpoint, and
    /// process the remaining ids in order.
    pub async fn run(&self) -> AppResult<CrawlSummary> {
        let ids = self.ids.fetch().await?;
        let start = self.resume_position(&ids).await?;
        log::info!(
            "starting sweep over {} ids ({} already done)",
            ids.len(),
            start
        );

        let mut summary = CrawlSummary::default();
        let mut remaining = ids[start..].iter().peekable();
        while let Some(id) = remaining.next() {
            let outcome = self.process(id).await?;
            summary.record(outcome);
            if remaining.peek().is_some() {
                tokio::time::sleep(self.sweep_delay).await;
            }
        }

        log::info!(
            "sweep finished: {} processed, {} saved, {} skipped, {} failed",
            summary.processed,
            summary.saved,
            summary.skipped,
            summary.failed
        );
        Ok(summary)
    }

    /// Index to start from. The checkpoint holds the last fully processed
    /// id; a checkpoint no longer present in the list resets to the start.
    async fn resume_position(&self, ids: &[String]) -> AppResult<usize> {
        let Some(last_done) = self.checkpoint.read().await? else {
            return Ok(0);
        };
        match ids.iter().position(|id| *id == last_done) {
            Some(pos) => Ok(pos + 1),
            None => {
                log::warn!(
                    "checkpoint id {} not in the current list, restarting from the top",
                    last_done
                );
                Ok(0)
            }
        }
    }

    /// Process one id. Only a checkpoint write failure propagates.
    async fn process(&self, id: &str) -> AppResult<CrawlOutcome> {
        let Some(anime) = self.reconciler.reconcile(id).await else {
            log::warn!("skipping {}: reconciliation produced nothing", id);
            return Ok(CrawlOutcome::Skipped);
        };

        if !self.policy.allows(&anime) {
            log::warn!("skipping {}: record too sparse to save", id);
            return Ok(CrawlOutcome::Skipped);
        }

        if let Err(e) = self.store.insert(&anime).await {
            log::error!("failed to store {}: {}", id, e);
            return Ok(CrawlOutcome::Failed);
        }

        let ttl = ttl_for_status(anime.status.as_deref());
        if let Err(e) = self.cache.set(&anime, ttl).await {
            log::warn!("cache write failed for {}: {}", id, e);
        }

        // Advance the checkpoint only after a durable insert. If the write
        // fails the run must stop, or a crash would re-skip saved work
        // without any record of where it stopped.
        self.checkpoint.write(id).await?;
        log::info!("saved {}", id);
        Ok(CrawlOutcome::Saved)
    }
}
