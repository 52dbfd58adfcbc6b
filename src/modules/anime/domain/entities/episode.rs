use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One reconciled episode.
///
/// Field values come from the episode metadata service first, then the
/// scraping provider, then fixed defaults, so every field is always present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub title: String,
    pub number: u32,
    pub air_date: Option<NaiveDate>,
    pub duration: u32,
    pub rating: String,
    pub image: Option<String>,
    pub overview: Option<String>,
}
