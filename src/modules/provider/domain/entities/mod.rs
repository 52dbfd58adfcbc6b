mod episode_map;
mod fetched;
mod partial_anime;
mod site_mapping;

pub use episode_map::{EpisodeMap, EpisodeMeta};
pub use fetched::Fetched;
pub use partial_anime::{ExternalId, PartialAnime, ScrapedEpisode};
pub use site_mapping::SiteMapping;
