pub mod domain;
pub mod infrastructure;
pub mod traits;

pub use domain::entities::{EpisodeMap, EpisodeMeta, Fetched, PartialAnime, ScrapedEpisode, SiteMapping};
pub use domain::value_objects::Provider;
