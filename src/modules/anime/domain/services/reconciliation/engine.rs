//! The reconciliation engine: one id in, at most one canonical record out.
//!
//! Per id the engine resolves cross-reference mappings, fans out to the
//! metadata and episode metadata services plus every scraping provider with a
//! resolved native id, and merges whatever came back under fixed precedence
//! rules. Any provider may fail individually; only an internal error in the
//! merge itself yields `None`.

use super::episode_merger::merge_episode_lists;
use super::field_resolver::{build_artworks, build_mappings, resolve_scalars, resolve_sets};
use crate::modules::anime::domain::entities::CanonicalAnime;
use crate::modules::provider::domain::entities::{EpisodeMap, Fetched, PartialAnime, SiteMapping};
use crate::modules::provider::domain::value_objects::Provider;
use crate::modules::provider::traits::{
    EpisodeMapClient, MappingClient, MetadataClient, ScraperClient,
};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Seam between the crawl controller / anime service and the engine.
#[async_trait]
pub trait Reconcile: Send + Sync {
    /// Build the canonical record for `id`, or `None` when reconciliation
    /// failed as a whole. Individual provider outages do not count as
    /// failure.
    async fn reconcile(&self, id: &str) -> Option<CanonicalAnime>;
}

pub struct ReconciliationEngine {
    metadata: Arc<dyn MetadataClient>,
    episode_map: Arc<dyn EpisodeMapClient>,
    mapping: Arc<dyn MappingClient>,
    scrapers: Vec<Arc<dyn ScraperClient>>,
}

impl ReconciliationEngine {
    pub fn new(
        metadata: Arc<dyn MetadataClient>,
        episode_map: Arc<dyn EpisodeMapClient>,
        mapping: Arc<dyn MappingClient>,
        scrapers: Vec<Arc<dyn ScraperClient>>,
    ) -> Self {
        Self {
            metadata,
            episode_map,
            mapping,
            scrapers,
        }
    }

    async fn try_reconcile(&self, id: &str) -> AppResult<CanonicalAnime> {
        // The mapping service gates the scrapers but is itself optional.
        let mappings = Fetched::from_result(self.mapping.resolve(id).await, "mapping service")
            .into_data_or_default();

        let native_ids: Vec<(Provider, Option<String>)> = self
            .scrapers
            .iter()
            .map(|s| (s.provider(), extract_native_id(s.provider(), &mappings)))
            .collect();

        let meta_fut = self.metadata.fetch(id);
        let ep_fut = self.episode_map.fetch(id);
        let scraper_futs = self
            .scrapers
            .iter()
            .zip(native_ids.iter())
            .map(|(scraper, (provider, native_id))| async move {
                match native_id {
                    // No resolved native id means no request at all.
                    None => Fetched::Empty,
                    Some(native) => Fetched::from_result(
                        scraper.fetch_anime(native).await,
                        provider.as_str(),
                    ),
                }
            });

        let (meta_result, ep_result, scraped) = tokio::join!(
            meta_fut,
            ep_fut,
            futures::future::join_all(scraper_futs)
        );

        let metadata = Fetched::from_result(meta_result, "metadata service");
        let episode_map = Fetched::from_result(ep_result, "episode metadata service");

        Ok(self.assemble(id, metadata, episode_map, &native_ids, scraped))
    }

    fn assemble(
        &self,
        id: &str,
        metadata: Fetched<PartialAnime>,
        episode_map: Fetched<EpisodeMap>,
        native_ids: &[(Provider, Option<String>)],
        scraped: Vec<Fetched<PartialAnime>>,
    ) -> CanonicalAnime {
        let meta = metadata.as_ref();
        let ep = episode_map.as_ref();
        let scraped_refs: Vec<Option<&PartialAnime>> =
            scraped.iter().map(Fetched::as_ref).collect();

        let mut anime = resolve_scalars(id, meta, ep);
        resolve_sets(&mut anime, meta, ep, &scraped_refs);
        anime.artworks = build_artworks(meta, ep);
        anime.mappings = build_mappings(id, meta, native_ids, ep);

        let ep_meta = ep.map(|e| e.episodes.as_slice()).unwrap_or(&[]);
        for (scraper, partial) in self.scrapers.iter().zip(scraped_refs.iter()) {
            if let Some(partial) = partial {
                let merged = merge_episode_lists(&partial.episodes, ep_meta);
                if !merged.is_empty() {
                    anime
                        .episodes
                        .insert(scraper.provider().to_string(), merged);
                }
            }
        }

        anime
    }
}

#[async_trait]
impl Reconcile for ReconciliationEngine {
    async fn reconcile(&self, id: &str) -> Option<CanonicalAnime> {
        match self.try_reconcile(id).await {
            Ok(anime) => Some(anime),
            Err(e) => {
                log::error!("reconciliation failed for {}: {}", id, e);
                None
            }
        }
    }
}

/// Pick the native id for `provider` out of the mapping service's site list.
///
/// Site names match case-insensitively. Identifiers pass through verbatim,
/// except the slash-path form some sites use, where the id is the second
/// path segment.
pub fn extract_native_id(provider: Provider, mappings: &[SiteMapping]) -> Option<String> {
    let entry = mappings
        .iter()
        .find(|m| m.site.eq_ignore_ascii_case(provider.site_key()))?;

    match provider {
        Provider::Zoro => Some(
            entry
                .identifier
                .split('/')
                .nth(1)
                .unwrap_or(&entry.identifier)
                .to_string(),
        ),
        _ => Some(entry.identifier.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(site: &str, identifier: &str) -> SiteMapping {
        SiteMapping {
            site: site.to_string(),
            identifier: identifier.to_string(),
        }
    }

    #[test]
    fn native_id_passes_through_verbatim() {
        let mappings = vec![mapping("Gogoanime", "shingeki-no-kyojin")];
        assert_eq!(
            extract_native_id(Provider::Gogoanime, &mappings).as_deref(),
            Some("shingeki-no-kyojin")
        );
    }

    #[test]
    fn site_match_is_case_insensitive() {
        let mappings = vec![mapping("gogoAnime", "one-piece")];
        assert_eq!(
            extract_native_id(Provider::Gogoanime, &mappings).as_deref(),
            Some("one-piece")
        );
    }

    #[test]
    fn slash_path_identifiers_use_the_second_segment() {
        let mappings = vec![mapping("Zoro", "watch/attack-on-titan-112")];
        assert_eq!(
            extract_native_id(Provider::Zoro, &mappings).as_deref(),
            Some("attack-on-titan-112")
        );
    }

    #[test]
    fn slash_free_identifier_falls_back_to_the_whole_value() {
        let mappings = vec![mapping("Zoro", "attack-on-titan-112")];
        assert_eq!(
            extract_native_id(Provider::Zoro, &mappings).as_deref(),
            Some("attack-on-titan-112")
        );
    }

    #[test]
    fn missing_site_resolves_to_none() {
        assert_eq!(extract_native_id(Provider::Zoro, &[]), None);
    }
}
