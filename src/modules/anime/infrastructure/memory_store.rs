//! In-process store and cache.
//!
//! Records are held in their stored JSON form so that what a caller reads
//! back is exactly what a durable backend would have persisted, field order
//! included.

use crate::modules::anime::application::ports::{AnimeCache, AnimeStore};
use crate::modules::anime::domain::entities::CanonicalAnime;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnimeStore for MemoryStore {
    async fn insert(&self, anime: &CanonicalAnime) -> AppResult<()> {
        let stored = anime.to_stored_value()?;
        self.records
            .write()
            .await
            .insert(anime.id.clone(), stored);
        Ok(())
    }

    async fn get(&self, id: &str) -> AppResult<Option<CanonicalAnime>> {
        let records = self.records.read().await;
        match records.get(id) {
            Some(value) => {
                let anime = serde_json::from_value(value.clone())
                    .map_err(|e| AppError::StorageError(format!("corrupt record {}: {}", id, e)))?;
                Ok(Some(anime))
            }
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> AppResult<Vec<CanonicalAnime>> {
        let records = self.records.read().await;
        let mut all = Vec::with_capacity(records.len());
        for (id, value) in records.iter() {
            let anime = serde_json::from_value(value.clone())
                .map_err(|e| AppError::StorageError(format!("corrupt record {}: {}", id, e)))?;
            all.push(anime);
        }
        Ok(all)
    }

    async fn delete_one(&self, id: &str) -> AppResult<()> {
        self.records.write().await.remove(id);
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.records.write().await.clear();
        Ok(())
    }
}

struct CacheEntry {
    anime: CanonicalAnime,
    expires_at: Instant,
}

#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnimeCache for MemoryCache {
    async fn get(&self, id: &str) -> AppResult<Option<CanonicalAnime>> {
        // Expired entries are dropped on read rather than swept.
        let mut entries = self.entries.write().await;
        match entries.get(id) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.anime.clone())),
            Some(_) => {
                entries.remove(id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, anime: &CanonicalAnime, ttl: Duration) -> AppResult<()> {
        let entry = CacheEntry {
            anime: anime.clone(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(anime.id.clone(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::anime::domain::entities::AnimeTitle;

    fn sample(id: &str) -> CanonicalAnime {
        CanonicalAnime {
            id: id.to_string(),
            title: AnimeTitle {
                english: Some("Cowboy Bebop".to_string()),
                ..Default::default()
            },
            genres: vec!["Action".to_string(), "Sci-Fi".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = MemoryStore::new();
        store.insert(&sample("1")).await.unwrap();
        let read = store.get("1").await.unwrap().unwrap();
        assert_eq!(read, sample("1"));
    }

    #[tokio::test]
    async fn insert_replaces_the_existing_record() {
        let store = MemoryStore::new();
        store.insert(&sample("1")).await.unwrap();
        let mut updated = sample("1");
        updated.genres.push("Drama".to_string());
        store.insert(&updated).await.unwrap();

        let read = store.get("1").await.unwrap().unwrap();
        assert_eq!(read.genres.len(), 3);
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn expired_cache_entries_read_as_misses() {
        let cache = MemoryCache::new();
        cache
            .set(&sample("1"), Duration::from_secs(0))
            .await
            .unwrap();
        assert!(cache.get("1").await.unwrap().is_none());

        cache
            .set(&sample("1"), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(cache.get("1").await.unwrap().is_some());
    }
}
