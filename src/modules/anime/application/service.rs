//! Read-path orchestration: cache, then store, then a fresh reconciliation.

use crate::modules::anime::application::ports::{AnimeCache, AnimeStore};
use crate::modules::anime::domain::entities::CanonicalAnime;
use crate::modules::anime::domain::services::reconciliation::Reconcile;
use crate::modules::anime::domain::services::save_policy::SavePolicy;
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Cache TTL keyed off airing status: terminal statuses change rarely and
/// can live for weeks, everything else is re-checked within the hour.
pub fn ttl_for_status(status: Option<&str>) -> Duration {
    match status {
        Some("FINISHED") | Some("CANCELLED") => Duration::from_secs(30 * 24 * 60 * 60),
        _ => Duration::from_secs(60 * 60),
    }
}

pub struct AnimeService {
    store: Arc<dyn AnimeStore>,
    cache: Arc<dyn AnimeCache>,
    reconciler: Arc<dyn Reconcile>,
    policy: SavePolicy,
    admin_secret: Option<String>,
}

impl AnimeService {
    pub fn new(
        store: Arc<dyn AnimeStore>,
        cache: Arc<dyn AnimeCache>,
        reconciler: Arc<dyn Reconcile>,
        policy: SavePolicy,
        admin_secret: Option<String>,
    ) -> Self {
        Self {
            store,
            cache,
            reconciler,
            policy,
            admin_secret,
        }
    }

    /// Fetch one record, falling back from cache to store to a fresh
    /// reconciliation. A fresh record that passes the save policy is written
    /// through to store and cache before being returned.
    pub async fn get_anime(&self, id: &str) -> AppResult<CanonicalAnime> {
        match self.cache.get(id).await {
            Ok(Some(anime)) => return Ok(anime),
            Ok(None) => {}
            Err(e) => log::warn!("cache read failed for {}: {}", id, e),
        }

        if let Some(anime) = self.store.get(id).await? {
            self.cache_quietly(&anime).await;
            return Ok(anime);
        }

        let anime = self
            .reconciler
            .reconcile(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("anime {} could not be built", id)))?;

        if self.policy.allows(&anime) {
            self.store.insert(&anime).await?;
            self.cache_quietly(&anime).await;
        }

        Ok(anime)
    }

    pub async fn get_all(&self) -> AppResult<Vec<CanonicalAnime>> {
        self.store.get_all().await
    }

    pub async fn delete_one(&self, id: &str) -> AppResult<()> {
        self.store.delete_one(id).await
    }

    /// Wipe the store. Requires the configured shared secret.
    pub async fn delete_all(&self, secret: &str) -> AppResult<()> {
        match self.admin_secret.as_deref() {
            Some(expected) if expected == secret => self.store.delete_all().await,
            _ => Err(AppError::Unauthorized(
                "invalid or missing admin secret".to_string(),
            )),
        }
    }

    async fn cache_quietly(&self, anime: &CanonicalAnime) {
        let ttl = ttl_for_status(anime.status.as_deref());
        if let Err(e) = self.cache.set(anime, ttl).await {
            log::warn!("cache write failed for {}: {}", anime.id, e);
        }
    }
}
