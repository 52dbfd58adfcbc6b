use super::models::{AniZipEpisode, AniZipResponse};
use crate::modules::anime::Artwork;
use crate::modules::provider::domain::entities::{EpisodeMap, EpisodeMeta};
use crate::modules::provider::domain::value_objects::Provider;
use crate::modules::provider::infrastructure::http_client::{RetryClient, RetryPolicy};
use crate::modules::provider::traits::EpisodeMapClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

/// Adapter for the ani.zip episode metadata service.
pub struct AniZipAdapter {
    client: RetryClient,
    base_url: String,
}

impl AniZipAdapter {
    pub fn new(base_url: &str, policy: RetryPolicy) -> AppResult<Self> {
        Ok(Self {
            client: RetryClient::new("anizip", policy)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl EpisodeMapClient for AniZipAdapter {
    async fn fetch(&self, id: &str) -> AppResult<EpisodeMap> {
        let url = format!("{}/mappings?anilist_id={}", self.base_url, id);
        let response: AniZipResponse = self.client.get_json(&url).await?;
        Ok(map_response(response))
    }
}

fn map_response(response: AniZipResponse) -> EpisodeMap {
    // Numeric keys only, in episode order; specials are not positional
    let mut numbered: Vec<(u32, &AniZipEpisode)> = response
        .episodes
        .iter()
        .filter_map(|(key, ep)| key.parse::<u32>().ok().map(|n| (n, ep)))
        .collect();
    numbered.sort_by_key(|(n, _)| *n);

    let episodes: Vec<EpisodeMeta> = numbered
        .into_iter()
        .map(|(number, ep)| EpisodeMeta {
            title: ep.preferred_title(),
            number: ep
                .episode
                .as_deref()
                .and_then(|raw| raw.parse::<u32>().ok())
                .or(Some(number)),
            air_date: ep
                .air_date
                .as_deref()
                .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()),
            duration: ep.runtime,
            rating: ep.rating.as_ref().and_then(value_as_string),
            image: ep.image.clone(),
            overview: ep.overview.clone(),
        })
        .collect();

    let cover_image = image_of_type(&response, "Poster");
    let banner_image = image_of_type(&response, "Banner").or_else(|| image_of_type(&response, "Fanart"));

    let artworks: Vec<Artwork> = response
        .images
        .iter()
        .filter_map(|img| {
            img.url.as_ref().map(|url| Artwork {
                url: url.clone(),
                kind: img
                    .cover_type
                    .as_deref()
                    .unwrap_or("unknown")
                    .to_lowercase(),
                provider: Provider::AniZip.to_string(),
            })
        })
        .collect();

    let mappings = response
        .mappings
        .iter()
        .filter_map(|(key, value)| value_as_string(value).map(|v| (key.clone(), v)))
        .collect();

    EpisodeMap {
        cover_image,
        banner_image,
        genres: Vec::new(),
        synonyms: Vec::new(),
        episodes,
        artworks,
        mappings,
    }
}

fn image_of_type(response: &AniZipResponse, cover_type: &str) -> Option<String> {
    response
        .images
        .iter()
        .find(|img| img.cover_type.as_deref() == Some(cover_type))
        .and_then(|img| img.url.clone())
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
