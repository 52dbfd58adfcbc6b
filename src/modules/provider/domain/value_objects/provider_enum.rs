use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream sources consumed during reconciliation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Provider {
    /// AniList GraphQL API - authoritative metadata source
    #[serde(rename = "anilist")]
    AniList,
    /// ani.zip episode metadata and artwork
    #[serde(rename = "anizip")]
    AniZip,
    /// MALSync cross-reference mapping service
    #[serde(rename = "malsync")]
    MalSync,
    /// Gogoanime scraper
    #[serde(rename = "gogoanime")]
    Gogoanime,
    /// Zoro scraper
    #[serde(rename = "zoro")]
    Zoro,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::AniList => "anilist",
            Provider::AniZip => "anizip",
            Provider::MalSync => "malsync",
            Provider::Gogoanime => "gogoanime",
            Provider::Zoro => "zoro",
        }
    }

    /// Site tag used by the mapping service's result set
    pub fn site_key(&self) -> &'static str {
        match self {
            Provider::AniList => "AniList",
            Provider::AniZip => "AniZip",
            Provider::MalSync => "MALSync",
            Provider::Gogoanime => "Gogoanime",
            Provider::Zoro => "Zoro",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
