use crate::modules::anime::Artwork;
use serde::{Deserialize, Serialize};

/// One provider's raw, possibly-incomplete contribution prior to merge.
///
/// Every field is optional or may be empty; adapters fill whatever their
/// source actually knows about and leave the rest alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialAnime {
    pub id: Option<String>,
    pub title_romaji: Option<String>,
    pub title_english: Option<String>,
    pub title_native: Option<String>,
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
    pub episodes: Vec<ScrapedEpisode>,
    pub artworks: Vec<Artwork>,
    /// Provider-native ids the source itself advertises
    pub external_ids: Vec<ExternalId>,
    /// Companion numeric id carried by the metadata service
    pub mal_id: Option<i64>,
}

/// A provider-name / provider-native-id pair advertised by a source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalId {
    pub provider: String,
    pub id: String,
}

/// Episode stub as reported by a scraping provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedEpisode {
    pub title: Option<String>,
    pub number: Option<u32>,
    pub url: Option<String>,
}

impl PartialAnime {
    /// Layer `over` on top of `self`: fields the overriding record carries
    /// win, everything else is kept. Set-valued fields are replaced wholesale
    /// when the overriding record has any entries.
    pub fn merged_with(mut self, over: PartialAnime) -> PartialAnime {
        self.id = over.id.or(self.id);
        self.title_romaji = over.title_romaji.or(self.title_romaji);
        self.title_english = over.title_english.or(self.title_english);
        self.title_native = over.title_native.or(self.title_native);
        self.description = over.description.or(self.description);
        self.status = over.status.or(self.status);
        self.format = over.format.or(self.format);
        self.season = over.season.or(self.season);
        self.season_year = over.season_year.or(self.season_year);
        self.score = over.score.or(self.score);
        self.duration = over.duration.or(self.duration);
        self.cover_image = over.cover_image.or(self.cover_image);
        self.banner_image = over.banner_image.or(self.banner_image);
        self.mal_id = over.mal_id.or(self.mal_id);
        if !over.genres.is_empty() {
            self.genres = over.genres;
        }
        if !over.synonyms.is_empty() {
            self.synonyms = over.synonyms;
        }
        if !over.episodes.is_empty() {
            self.episodes = over.episodes;
        }
        if !over.artworks.is_empty() {
            self.artworks = over.artworks;
        }
        if !over.external_ids.is_empty() {
            self.external_ids = over.external_ids;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_with_prefers_overriding_fields() {
        let base = PartialAnime {
            title_romaji: Some("Shingeki no Kyojin".to_string()),
            description: Some("base description".to_string()),
            status: Some("RELEASING".to_string()),
            genres: vec!["Action".to_string()],
            ..Default::default()
        };
        let over = PartialAnime {
            description: Some("richer description".to_string()),
            genres: vec!["Action".to_string(), "Drama".to_string()],
            ..Default::default()
        };

        let merged = base.merged_with(over);
        assert_eq!(merged.title_romaji.as_deref(), Some("Shingeki no Kyojin"));
        assert_eq!(merged.description.as_deref(), Some("richer description"));
        assert_eq!(merged.status.as_deref(), Some("RELEASING"));
        assert_eq!(merged.genres, vec!["Action", "Drama"]);
    }

    #[test]
    fn merged_with_keeps_base_collections_when_override_is_empty() {
        let base = PartialAnime {
            synonyms: vec!["AoT".to_string()],
            ..Default::default()
        };
        let merged = base.merged_with(PartialAnime::default());
        assert_eq!(merged.synonyms, vec!["AoT"]);
    }
}
