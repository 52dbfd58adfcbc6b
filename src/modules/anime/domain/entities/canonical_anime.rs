use super::Episode;
use crate::shared::errors::AppResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Title variants for one anime
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnimeTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

impl AnimeTitle {
    /// Preferred display title
    pub fn main(&self) -> Option<&str> {
        self.english
            .as_deref()
            .or(self.romaji.as_deref())
            .or(self.native.as_deref())
    }
}

/// One artwork entry with its provenance tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artwork {
    pub url: String,
    pub kind: String,
    pub provider: String,
}

/// The single reconciled record for one anime id.
///
/// `id` is the original input id and never changes once assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CanonicalAnime {
    pub id: String,
    pub title: AnimeTitle,
    pub description: Option<String>,
    pub status: Option<String>,
    pub format: Option<String>,
    pub season: Option<String>,
    pub season_year: Option<i32>,
    pub score: Option<f32>,
    pub duration: Option<u32>,
    pub cover_image: Option<String>,
    pub banner_image: Option<String>,
    pub genres: Vec<String>,
    pub synonyms: Vec<String>,
    /// Merged episode lists, keyed by scraping provider
    pub episodes: BTreeMap<String, Vec<Episode>>,
    pub artworks: Vec<Artwork>,
    /// External-provider name -> provider-native id
    pub mappings: BTreeMap<String, String>,
}

impl CanonicalAnime {
    /// Serialized form used for persistence: top-level fields stably sorted
    /// by ascending value length. The order is cosmetic but must stay
    /// reproducible for compatibility with existing stored records.
    pub fn to_stored_value(&self) -> AppResult<Value> {
        let value = serde_json::to_value(self)?;
        Ok(crate::modules::anime::domain::services::reconciliation::reorder_top_level(value))
    }
}
