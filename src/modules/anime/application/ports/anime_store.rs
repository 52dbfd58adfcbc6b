use crate::modules::anime::domain::entities::CanonicalAnime;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Durable storage for reconciled records, keyed by the original input id.
///
/// `insert` persists the stored form produced by
/// [`CanonicalAnime::to_stored_value`] and replaces any existing record for
/// the same id.
#[async_trait]
pub trait AnimeStore: Send + Sync {
    async fn insert(&self, anime: &CanonicalAnime) -> AppResult<()>;

    async fn get(&self, id: &str) -> AppResult<Option<CanonicalAnime>>;

    async fn get_all(&self) -> AppResult<Vec<CanonicalAnime>>;

    async fn delete_one(&self, id: &str) -> AppResult<()>;

    async fn delete_all(&self) -> AppResult<()>;
}
