mod anime_cache;
mod anime_store;

pub use anime_cache::AnimeCache;
pub use anime_store::AnimeStore;
