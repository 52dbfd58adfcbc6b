pub mod anilist;
pub mod anizip;
pub mod malsync;
pub mod scraper;

pub use anilist::AniListAdapter;
pub use anizip::AniZipAdapter;
pub use malsync::MalSyncAdapter;
pub use scraper::ScraperAdapter;
