use super::models::ScraperAnimeResponse;
use crate::modules::provider::domain::entities::{PartialAnime, ScrapedEpisode};
use crate::modules::provider::domain::value_objects::Provider;
use crate::modules::provider::infrastructure::http_client::{RetryClient, RetryPolicy};
use crate::modules::provider::traits::ScraperClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Adapter over a scraping provider's JSON endpoint.
///
/// Both scraping providers expose the same normalized surface, so one adapter
/// serves both; only the provider tag and base URL differ.
pub struct ScraperAdapter {
    provider: Provider,
    client: RetryClient,
    base_url: String,
}

impl ScraperAdapter {
    pub fn gogoanime(base_url: &str, policy: RetryPolicy) -> AppResult<Self> {
        Self::new(Provider::Gogoanime, base_url, policy)
    }

    pub fn zoro(base_url: &str, policy: RetryPolicy) -> AppResult<Self> {
        Self::new(Provider::Zoro, base_url, policy)
    }

    fn new(provider: Provider, base_url: &str, policy: RetryPolicy) -> AppResult<Self> {
        Ok(Self {
            provider,
            client: RetryClient::new(provider.as_str(), policy)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ScraperClient for ScraperAdapter {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn fetch_anime(&self, native_id: &str) -> AppResult<PartialAnime> {
        let url = format!("{}/anime/{}", self.base_url, native_id);
        let response: ScraperAnimeResponse = self.client.get_json(&url).await?;
        Ok(map_response(native_id, response))
    }
}

fn map_response(native_id: &str, response: ScraperAnimeResponse) -> PartialAnime {
    PartialAnime {
        id: Some(native_id.to_string()),
        title_romaji: response.title,
        status: response.status,
        description: response.description,
        cover_image: response.image,
        genres: response.genres,
        synonyms: response.synonyms,
        episodes: response
            .episodes
            .into_iter()
            .map(|ep| ScrapedEpisode {
                title: ep.title,
                number: ep.number,
                url: ep.url,
            })
            .collect(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_episode_list() {
        let response: ScraperAnimeResponse = serde_json::from_value(json!({
            "title": "Attack on Titan",
            "genres": ["Action"],
            "episodes": [
                { "title": "To You, in 2000 Years", "number": 1, "url": "/watch/aot-1" },
                { "number": 2 }
            ]
        }))
        .unwrap();

        let partial = map_response("attack-on-titan-112", response);
        assert_eq!(partial.id.as_deref(), Some("attack-on-titan-112"));
        assert_eq!(partial.episodes.len(), 2);
        assert_eq!(partial.episodes[0].title.as_deref(), Some("To You, in 2000 Years"));
        assert_eq!(partial.episodes[1].number, Some(2));
    }
}
