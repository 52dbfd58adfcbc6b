//! Field-level precedence rules for the merge.
//!
//! Scalars: the metadata service's combined record is authoritative; the
//! episode metadata service overrides only the image fields, and only with a
//! non-empty value. Sets: ordered union, first occurrence wins. Provider-id
//! map: fixed overlay sequence with the episode metadata service applied
//! last.

use crate::modules::anime::domain::entities::{AnimeTitle, Artwork, CanonicalAnime};
use crate::modules::provider::domain::entities::{EpisodeMap, PartialAnime};
use crate::modules::provider::domain::value_objects::Provider;
use std::collections::BTreeMap;

pub fn resolve_scalars(
    id: &str,
    metadata: Option<&PartialAnime>,
    episode_map: Option<&EpisodeMap>,
) -> CanonicalAnime {
    let mut anime = CanonicalAnime {
        id: id.to_string(),
        ..Default::default()
    };

    if let Some(meta) = metadata {
        anime.title = AnimeTitle {
            romaji: meta.title_romaji.clone(),
            english: meta.title_english.clone(),
            native: meta.title_native.clone(),
        };
        anime.description = meta.description.clone();
        anime.status = meta.status.clone();
        anime.format = meta.format.clone();
        anime.season = meta.season.clone();
        anime.season_year = meta.season_year;
        anime.score = meta.score;
        anime.duration = meta.duration;
        anime.cover_image = meta.cover_image.clone();
        anime.banner_image = meta.banner_image.clone();
    }

    if let Some(ep) = episode_map {
        if let Some(cover) = ep.cover_image.as_ref().filter(|v| !v.is_empty()) {
            anime.cover_image = Some(cover.clone());
        }
        if let Some(banner) = ep.banner_image.as_ref().filter(|v| !v.is_empty()) {
            anime.banner_image = Some(banner.clone());
        }
    }

    anime
}

/// Genre and synonym union in source-priority order: metadata service,
/// episode metadata service, then each scraping provider in its fixed order.
pub fn resolve_sets(
    anime: &mut CanonicalAnime,
    metadata: Option<&PartialAnime>,
    episode_map: Option<&EpisodeMap>,
    scraped: &[Option<&PartialAnime>],
) {
    if let Some(meta) = metadata {
        union_into(&mut anime.genres, &meta.genres);
        union_into(&mut anime.synonyms, &meta.synonyms);
    }
    if let Some(ep) = episode_map {
        union_into(&mut anime.genres, &ep.genres);
        union_into(&mut anime.synonyms, &ep.synonyms);
    }
    for partial in scraped.iter().flatten() {
        union_into(&mut anime.genres, &partial.genres);
        union_into(&mut anime.synonyms, &partial.synonyms);
    }
}

/// Append unseen values, preserving the first occurrence verbatim.
pub fn union_into(target: &mut Vec<String>, source: &[String]) {
    for value in source {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}

/// Episode metadata artworks first (already lower-cased and tagged by their
/// adapter), then the metadata service's entries with their own provider
/// tags. Plain concatenation, no deduplication.
pub fn build_artworks(
    metadata: Option<&PartialAnime>,
    episode_map: Option<&EpisodeMap>,
) -> Vec<Artwork> {
    let mut artworks = Vec::new();
    if let Some(ep) = episode_map {
        artworks.extend(ep.artworks.iter().cloned());
    }
    if let Some(meta) = metadata {
        artworks.extend(meta.artworks.iter().cloned());
    }
    artworks
}

/// Overlay sequence for the provider-id map. Later writes win:
/// 1. the metadata service's own external-id list,
/// 2. the resolved scraper-native ids,
/// 3. the metadata service's companion numeric id, as text,
/// 4. the original input id under the metadata service's key,
/// 5. the episode metadata service's own map.
pub fn build_mappings(
    input_id: &str,
    metadata: Option<&PartialAnime>,
    resolved_ids: &[(Provider, Option<String>)],
    episode_map: Option<&EpisodeMap>,
) -> BTreeMap<String, String> {
    let mut mappings = BTreeMap::new();

    if let Some(meta) = metadata {
        for external in &meta.external_ids {
            mappings.insert(external.provider.to_lowercase(), external.id.clone());
        }
    }

    for (provider, native_id) in resolved_ids {
        if let Some(native) = native_id {
            mappings.insert(provider.to_string(), native.clone());
        }
    }

    if let Some(mal_id) = metadata.and_then(|m| m.mal_id) {
        mappings.insert("mal".to_string(), mal_id.to_string());
    }

    mappings.insert(Provider::AniList.to_string(), input_id.to_string());

    if let Some(ep) = episode_map {
        for (key, value) in &ep.mappings {
            mappings.insert(key.clone(), value.clone());
        }
    }

    mappings
}
