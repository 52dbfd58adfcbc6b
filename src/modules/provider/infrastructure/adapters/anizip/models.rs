//! ani.zip response models

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct AniZipResponse {
    /// Keyed by episode number; specials carry non-numeric keys
    #[serde(default)]
    pub episodes: BTreeMap<String, AniZipEpisode>,
    #[serde(default)]
    pub images: Vec<AniZipImage>,
    #[serde(default)]
    pub mappings: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct AniZipEpisode {
    #[serde(default)]
    pub title: BTreeMap<String, String>,
    pub episode: Option<String>,
    #[serde(rename = "airDate")]
    pub air_date: Option<String>,
    pub runtime: Option<u32>,
    pub rating: Option<Value>,
    pub image: Option<String>,
    pub overview: Option<String>,
}

impl AniZipEpisode {
    /// English title, falling back to any available language
    pub fn preferred_title(&self) -> Option<String> {
        self.title
            .get("en")
            .or_else(|| self.title.values().next())
            .cloned()
    }
}

#[derive(Debug, Deserialize)]
pub struct AniZipImage {
    #[serde(rename = "coverType")]
    pub cover_type: Option<String>,
    pub url: Option<String>,
}
