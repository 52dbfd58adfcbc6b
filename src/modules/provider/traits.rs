//! Contracts between the reconciliation engine and the provider adapters.
//!
//! The engine (and its tests) depend on these traits only; the concrete
//! adapters live in `infrastructure::adapters`.

use crate::modules::provider::domain::entities::{EpisodeMap, PartialAnime, SiteMapping};
use crate::modules::provider::domain::value_objects::Provider;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// The authoritative metadata service, fetched unconditionally per id.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    async fn fetch(&self, id: &str) -> AppResult<PartialAnime>;
}

/// The episode metadata service, fetched unconditionally per id.
#[async_trait]
pub trait EpisodeMapClient: Send + Sync {
    async fn fetch(&self, id: &str) -> AppResult<EpisodeMap>;
}

/// The cross-reference mapping service resolving scraper-native ids.
#[async_trait]
pub trait MappingClient: Send + Sync {
    async fn resolve(&self, id: &str) -> AppResult<Vec<SiteMapping>>;
}

/// A scraping provider, fetched only when a native id resolved for it.
#[async_trait]
pub trait ScraperClient: Send + Sync {
    fn provider(&self) -> Provider;

    async fn fetch_anime(&self, native_id: &str) -> AppResult<PartialAnime>;
}
