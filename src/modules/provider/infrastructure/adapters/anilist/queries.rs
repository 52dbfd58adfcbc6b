/// AniList GraphQL query definitions
use serde_json::{json, Value};

pub struct AniListQueries;

impl AniListQueries {
    /// General-purpose media query: core metadata for one anime
    pub fn media() -> &'static str {
        r#"
            query ($id: Int) {
                Media(id: $id, type: ANIME) {
                    id
                    idMal
                    title {
                        romaji
                        english
                        native
                    }
                    description
                    status
                    format
                    season
                    seasonYear
                    episodes
                    duration
                    averageScore
                    coverImage {
                        extraLarge
                        large
                        medium
                    }
                    bannerImage
                    genres
                    synonyms
                }
            }
        "#
    }

    /// Specialized info query: external ids and artwork entries.
    /// Fields it shares with the media query override the media values.
    pub fn info() -> &'static str {
        r#"
            query ($id: Int) {
                Media(id: $id, type: ANIME) {
                    id
                    idMal
                    description(asHtml: false)
                    status
                    synonyms
                    coverImage {
                        extraLarge
                        large
                    }
                    bannerImage
                    externalLinks {
                        id
                        site
                        url
                    }
                    streamingEpisodes {
                        title
                        thumbnail
                        site
                    }
                }
            }
        "#
    }

    pub fn id_variables(id: i64) -> Value {
        json!({ "id": id })
    }
}
