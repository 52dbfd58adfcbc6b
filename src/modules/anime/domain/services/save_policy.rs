//! Persistence gate applied to every reconciled record before it is stored.

use crate::modules::anime::domain::entities::CanonicalAnime;

/// Airing statuses considered well-formed enough for strict persistence.
const SAVING_STATUSES: [&str; 5] = [
    "FINISHED",
    "RELEASING",
    "NOT_YET_RELEASED",
    "CANCELLED",
    "HIATUS",
];

/// How much of a record must be present before it is worth saving.
///
/// `Lenient` asks only for an id and a displayable title and is the default;
/// `Strict` additionally requires a recognized airing status, which filters
/// out records built from partial provider data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    #[default]
    Lenient,
    Strict,
}

impl SavePolicy {
    pub fn allows(&self, anime: &CanonicalAnime) -> bool {
        let viable = !anime.id.is_empty()
            && anime.title.main().map_or(false, |t| !t.is_empty());
        match self {
            SavePolicy::Lenient => viable,
            SavePolicy::Strict => {
                viable
                    && anime
                        .status
                        .as_deref()
                        .map_or(false, |s| SAVING_STATUSES.contains(&s))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::anime::domain::entities::AnimeTitle;

    fn anime(title: Option<&str>, status: Option<&str>) -> CanonicalAnime {
        CanonicalAnime {
            id: "21".to_string(),
            title: AnimeTitle {
                romaji: title.map(str::to_string),
                ..Default::default()
            },
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn lenient_needs_only_id_and_title() {
        assert!(SavePolicy::Lenient.allows(&anime(Some("One Piece"), None)));
        assert!(!SavePolicy::Lenient.allows(&anime(None, Some("FINISHED"))));
        assert!(!SavePolicy::Lenient.allows(&anime(Some(""), Some("FINISHED"))));
    }

    #[test]
    fn lenient_ignores_unknown_statuses() {
        assert!(SavePolicy::Lenient.allows(&anime(Some("One Piece"), Some("SOMEDAY"))));
    }

    #[test]
    fn strict_requires_a_recognized_status() {
        assert!(SavePolicy::Strict.allows(&anime(Some("One Piece"), Some("RELEASING"))));
        assert!(!SavePolicy::Strict.allows(&anime(Some("One Piece"), Some("SOMEDAY"))));
        assert!(!SavePolicy::Strict.allows(&anime(Some("One Piece"), None)));
    }

    #[test]
    fn empty_id_never_saves() {
        let mut record = anime(Some("One Piece"), Some("FINISHED"));
        record.id.clear();
        assert!(!SavePolicy::Lenient.allows(&record));
        assert!(!SavePolicy::Strict.allows(&record));
    }
}
