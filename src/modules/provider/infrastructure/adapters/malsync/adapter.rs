use super::models::MalSyncResponse;
use crate::modules::provider::domain::entities::SiteMapping;
use crate::modules::provider::infrastructure::http_client::{RetryClient, RetryPolicy};
use crate::modules::provider::traits::MappingClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Adapter for the MALSync cross-reference mapping service.
pub struct MalSyncAdapter {
    client: RetryClient,
    base_url: String,
}

impl MalSyncAdapter {
    pub fn new(base_url: &str, policy: RetryPolicy) -> AppResult<Self> {
        Ok(Self {
            client: RetryClient::new("malsync", policy)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MappingClient for MalSyncAdapter {
    async fn resolve(&self, id: &str) -> AppResult<Vec<SiteMapping>> {
        let url = format!("{}/anilist/anime/{}", self.base_url, id);
        let response: MalSyncResponse = self.client.get_json(&url).await?;
        Ok(flatten(response))
    }
}

fn flatten(response: MalSyncResponse) -> Vec<SiteMapping> {
    response
        .sites
        .into_iter()
        .filter_map(|(site, entries)| {
            // First entry per site; the service lists alternates after it
            let entry = entries.into_values().next()?;
            let identifier = entry
                .identifier
                .or_else(|| entry.url.as_deref().map(url_path))?;
            Some(SiteMapping { site, identifier })
        })
        .collect()
}

/// Path portion of a URL, without the leading slash
fn url_path(url: &str) -> String {
    let without_scheme = url.split("://").nth(1).unwrap_or(url);
    match without_scheme.split_once('/') {
        Some((_, path)) => path.to_string(),
        None => without_scheme.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_one_mapping_per_site() {
        let response: MalSyncResponse = serde_json::from_value(json!({
            "Sites": {
                "Gogoanime": { "shingeki-no-kyojin": { "identifier": "shingeki-no-kyojin" } },
                "Zoro": { "100": { "url": "https://zoro.example/watch/attack-on-titan-112" } }
            }
        }))
        .unwrap();

        let mut mappings = flatten(response);
        mappings.sort_by(|a, b| a.site.cmp(&b.site));

        assert_eq!(
            mappings,
            vec![
                SiteMapping {
                    site: "Gogoanime".to_string(),
                    identifier: "shingeki-no-kyojin".to_string(),
                },
                SiteMapping {
                    site: "Zoro".to_string(),
                    identifier: "watch/attack-on-titan-112".to_string(),
                },
            ]
        );
    }

    #[test]
    fn url_path_strips_scheme_and_host() {
        assert_eq!(url_path("https://zoro.example/watch/x-1"), "watch/x-1");
        assert_eq!(url_path("zoro.example"), "zoro.example");
    }

    #[test]
    fn sites_without_usable_entries_are_dropped() {
        let response: MalSyncResponse = serde_json::from_value(json!({
            "Sites": { "Crunchyroll": {} }
        }))
        .unwrap();
        assert!(flatten(response).is_empty());
    }
}
