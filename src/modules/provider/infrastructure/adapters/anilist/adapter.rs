use super::models::{GraphQlResponse, Media, MediaData};
use super::queries::AniListQueries;
use crate::modules::anime::Artwork;
use crate::modules::provider::domain::entities::{ExternalId, PartialAnime};
use crate::modules::provider::infrastructure::http_client::{RetryClient, RetryPolicy};
use crate::modules::provider::traits::MetadataClient;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Adapter for the AniList GraphQL API.
///
/// The combined result merges the general media query with the specialized
/// info query; the info fields win whenever both carry a value.
pub struct AniListAdapter {
    client: RetryClient,
    url: String,
}

impl AniListAdapter {
    pub fn new(url: &str, policy: RetryPolicy) -> AppResult<Self> {
        Ok(Self {
            // AniList degraded state: 30 req/min
            client: RetryClient::with_pacing("anilist", policy, 0.5, 2)?,
            url: url.to_string(),
        })
    }

    async fn fetch_media(&self, id: i64) -> AppResult<PartialAnime> {
        let media = self
            .execute(AniListQueries::media(), AniListQueries::id_variables(id))
            .await?;
        Ok(map_media(media))
    }

    async fn fetch_info(&self, id: i64) -> AppResult<PartialAnime> {
        let media = self
            .execute(AniListQueries::info(), AniListQueries::id_variables(id))
            .await?;
        Ok(map_media(media))
    }

    async fn execute(&self, query: &str, variables: Value) -> AppResult<Media> {
        let body = json!({ "query": query, "variables": variables });
        let response: GraphQlResponse<MediaData> = self.client.post_json(&self.url, &body).await?;

        if let Some(errors) = response.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(AppError::ApiError(format!(
                "AniList GraphQL errors: {}",
                messages.join(", ")
            )));
        }

        response
            .data
            .and_then(|d| d.media)
            .ok_or_else(|| AppError::NotFound("AniList returned no media".to_string()))
    }
}

#[async_trait]
impl MetadataClient for AniListAdapter {
    async fn fetch(&self, id: &str) -> AppResult<PartialAnime> {
        let numeric_id = id
            .parse::<i64>()
            .map_err(|_| AppError::InvalidInput(format!("AniList requires a numeric id: {}", id)))?;

        let media = self.fetch_media(numeric_id).await?;

        // Info is an enrichment; losing it degrades the record, not the fetch.
        match self.fetch_info(numeric_id).await {
            Ok(info) => Ok(media.merged_with(info)),
            Err(e) => {
                log::warn!("AniList info query for {} failed: {}", id, e);
                Ok(media)
            }
        }
    }
}

fn map_media(media: Media) -> PartialAnime {
    let title = media.title.as_ref();

    let artworks: Vec<Artwork> = media
        .streaming_episodes
        .iter()
        .filter_map(|ep| {
            ep.thumbnail.as_ref().map(|url| Artwork {
                url: url.clone(),
                kind: "thumbnail".to_string(),
                provider: ep
                    .site
                    .as_deref()
                    .unwrap_or("anilist")
                    .to_lowercase(),
            })
        })
        .collect();

    let external_ids: Vec<ExternalId> = media
        .external_links
        .iter()
        .filter_map(|link| {
            let provider = link.site.clone()?;
            let id = link.id.map(|n| n.to_string()).or_else(|| link.url.clone())?;
            Some(ExternalId { provider, id })
        })
        .collect();

    PartialAnime {
        id: Some(media.id.to_string()),
        title_romaji: title.and_then(|t| t.romaji.clone()),
        title_english: title.and_then(|t| t.english.clone()),
        title_native: title.and_then(|t| t.native.clone()),
        description: media.description,
        status: media.status,
        format: media.format,
        season: media.season,
        season_year: media.season_year,
        score: media.average_score.map(|s| s as f32),
        duration: media.duration,
        cover_image: media.cover_image.as_ref().and_then(|c| c.best()),
        banner_image: media.banner_image,
        genres: media.genres,
        synonyms: media.synonyms,
        episodes: Vec::new(),
        artworks,
        external_ids,
        mal_id: media.id_mal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_fixture(json_value: Value) -> Media {
        serde_json::from_value(json_value).unwrap()
    }

    #[test]
    fn maps_core_fields() {
        let media = media_fixture(json!({
            "id": 16498,
            "idMal": 16498,
            "title": { "romaji": "Shingeki no Kyojin", "english": "Attack on Titan" },
            "status": "FINISHED",
            "averageScore": 84,
            "coverImage": { "large": "https://img.example/large.jpg" },
            "genres": ["Action", "Drama"]
        }));

        let partial = map_media(media);
        assert_eq!(partial.id.as_deref(), Some("16498"));
        assert_eq!(partial.title_english.as_deref(), Some("Attack on Titan"));
        assert_eq!(partial.status.as_deref(), Some("FINISHED"));
        assert_eq!(partial.cover_image.as_deref(), Some("https://img.example/large.jpg"));
        assert_eq!(partial.mal_id, Some(16498));
        assert_eq!(partial.genres, vec!["Action", "Drama"]);
    }

    #[test]
    fn maps_links_and_artworks() {
        let media = media_fixture(json!({
            "id": 1,
            "externalLinks": [
                { "id": 55, "site": "Crunchyroll", "url": "https://cr.example/a" },
                { "site": "Official Site" }
            ],
            "streamingEpisodes": [
                { "title": "Episode 1", "thumbnail": "https://img.example/t1.jpg", "site": "Crunchyroll" }
            ]
        }));

        let partial = map_media(media);
        assert_eq!(partial.external_ids.len(), 1);
        assert_eq!(partial.external_ids[0].provider, "Crunchyroll");
        assert_eq!(partial.external_ids[0].id, "55");
        assert_eq!(partial.artworks.len(), 1);
        assert_eq!(partial.artworks[0].provider, "crunchyroll");
    }
}
