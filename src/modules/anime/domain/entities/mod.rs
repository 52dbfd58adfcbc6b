mod canonical_anime;
mod episode;

pub use canonical_anime::{AnimeTitle, Artwork, CanonicalAnime};
pub use episode::Episode;
