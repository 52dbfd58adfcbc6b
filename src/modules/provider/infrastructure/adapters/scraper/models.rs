//! Scraper endpoint response models, shared by both scraping providers

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ScraperAnimeResponse {
    pub title: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub episodes: Vec<ScraperEpisode>,
}

#[derive(Debug, Deserialize)]
pub struct ScraperEpisode {
    pub title: Option<String>,
    pub number: Option<u32>,
    pub url: Option<String>,
}
