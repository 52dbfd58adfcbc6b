use crate::modules::anime::domain::entities::CanonicalAnime;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use std::time::Duration;

/// Read-through cache in front of the store. Entries expire after the TTL
/// chosen by the caller; a miss and an expired entry are indistinguishable.
#[async_trait]
pub trait AnimeCache: Send + Sync {
    async fn get(&self, id: &str) -> AppResult<Option<CanonicalAnime>>;

    async fn set(&self, anime: &CanonicalAnime, ttl: Duration) -> AppResult<()>;
}
