//! Positional episode pairing.
//!
//! A scraping provider's episode list is paired index-by-index with the
//! episode metadata service's records; an index with no metadata record is
//! dropped entirely. Within one pair, the metadata service wins per field,
//! the provider fills gaps, and fixed defaults back everything.

use crate::modules::anime::domain::entities::Episode;
use crate::modules::provider::domain::entities::{EpisodeMeta, ScrapedEpisode};

const UNTITLED: &str = "Untitled Episode";

pub fn merge_episode_lists(scraped: &[ScrapedEpisode], meta: &[EpisodeMeta]) -> Vec<Episode> {
    scraped
        .iter()
        .enumerate()
        .filter_map(|(index, episode)| {
            let record = meta.get(index)?;
            Some(resolve_episode(index, episode, record))
        })
        .collect()
}

fn resolve_episode(index: usize, scraped: &ScrapedEpisode, meta: &EpisodeMeta) -> Episode {
    Episode {
        title: meta
            .title
            .clone()
            .or_else(|| scraped.title.clone())
            .unwrap_or_else(|| UNTITLED.to_string()),
        number: meta
            .number
            .or(scraped.number)
            .unwrap_or(index as u32 + 1),
        air_date: meta.air_date,
        duration: meta.duration.unwrap_or(0),
        rating: meta.rating.clone().unwrap_or_else(|| "0".to_string()),
        image: meta.image.clone(),
        overview: meta.overview.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraped(titles: &[Option<&str>]) -> Vec<ScrapedEpisode> {
        titles
            .iter()
            .map(|t| ScrapedEpisode {
                title: t.map(|s| s.to_string()),
                ..Default::default()
            })
            .collect()
    }

    fn meta(count: usize) -> Vec<EpisodeMeta> {
        (0..count)
            .map(|i| EpisodeMeta {
                title: Some(format!("Mapped {}", i + 1)),
                number: Some(i as u32 + 1),
                duration: Some(24),
                rating: Some("8.1".to_string()),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn unmapped_trailing_indices_are_dropped() {
        let merged = merge_episode_lists(&scraped(&[Some("a"), Some("b"), Some("c")]), &meta(2));
        assert_eq!(merged.len(), 2);

        let merged = merge_episode_lists(&scraped(&[Some("a"), Some("b")]), &meta(2));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn metadata_wins_per_field() {
        let merged = merge_episode_lists(&scraped(&[Some("Scraped Title")]), &meta(1));
        assert_eq!(merged[0].title, "Mapped 1");
        assert_eq!(merged[0].duration, 24);
        assert_eq!(merged[0].rating, "8.1");
    }

    #[test]
    fn provider_fills_metadata_gaps() {
        let sparse_meta = vec![EpisodeMeta::default()];
        let merged = merge_episode_lists(&scraped(&[Some("Scraped Title")]), &sparse_meta);
        assert_eq!(merged[0].title, "Scraped Title");
    }

    #[test]
    fn defaults_back_everything() {
        let merged = merge_episode_lists(&scraped(&[None, None]), &vec![EpisodeMeta::default(); 2]);
        assert_eq!(merged[0].title, "Untitled Episode");
        assert_eq!(merged[0].number, 1);
        assert_eq!(merged[1].number, 2);
        assert_eq!(merged[0].duration, 0);
        assert_eq!(merged[0].rating, "0");
    }

    #[test]
    fn empty_metadata_drops_all_episodes() {
        let merged = merge_episode_lists(&scraped(&[Some("a"), Some("b")]), &[]);
        assert!(merged.is_empty());
    }
}
