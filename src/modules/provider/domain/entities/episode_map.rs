use crate::modules::anime::Artwork;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contribution of the episode metadata service for one anime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeMap {
    /// Image overrides, applied over the metadata service's values when set
    pub cover_image: Option<String>,
    pub banner_image: Option<String>,
    pub genres: Vec<String>,
    pub synonyms: Vec<String>,
    /// Positional per-episode records; index-paired with scraped episode lists
    pub episodes: Vec<EpisodeMeta>,
    pub artworks: Vec<Artwork>,
    /// The service's own provider-id map; wins on key collision
    pub mappings: BTreeMap<String, String>,
}

/// Per-episode record from the episode metadata service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeMeta {
    pub title: Option<String>,
    pub number: Option<u32>,
    pub air_date: Option<NaiveDate>,
    pub duration: Option<u32>,
    pub rating: Option<String>,
    pub image: Option<String>,
    pub overview: Option<String>,
}
