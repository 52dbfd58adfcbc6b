use crate::shared::errors::{AppError, AppResult};
use std::env;
use std::time::Duration;

/// Runtime configuration, sourced from the environment (`.env` supported).
///
/// Every upstream endpoint is overridable so the crawler can be pointed at
/// mirrors or self-hosted scraper instances.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// AniList GraphQL endpoint
    pub anilist_url: String,
    /// Episode metadata service endpoint
    pub anizip_url: String,
    /// Cross-reference mapping service endpoint
    pub malsync_url: String,
    /// Gogoanime scraper endpoint
    pub gogoanime_url: String,
    /// Zoro scraper endpoint
    pub zoro_url: String,
    /// Newline-delimited id list, refetched on every run
    pub id_list_url: String,
    /// File slot holding the last fully processed id
    pub checkpoint_path: String,
    /// Fixed pause between crawled ids
    pub sweep_delay: Duration,
    /// Retry ceiling for outbound requests
    pub max_retries: u32,
    /// Base delay for exponential backoff
    pub base_delay: Duration,
    /// Upper bound for any computed retry delay
    pub max_delay: Duration,
    /// Shared secret gating destructive operations; unset disables them
    pub admin_secret: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let id_list_url = env::var("TSUMUGI_ID_LIST_URL").map_err(|_| {
            AppError::InvalidInput("TSUMUGI_ID_LIST_URL must be set".to_string())
        })?;

        Ok(Self {
            anilist_url: env_or("TSUMUGI_ANILIST_URL", "https://graphql.anilist.co"),
            anizip_url: env_or("TSUMUGI_ANIZIP_URL", "https://api.ani.zip"),
            malsync_url: env_or("TSUMUGI_MALSYNC_URL", "https://api.malsync.moe"),
            gogoanime_url: env_or("TSUMUGI_GOGOANIME_URL", "http://localhost:3001"),
            zoro_url: env_or("TSUMUGI_ZORO_URL", "http://localhost:3002"),
            id_list_url,
            checkpoint_path: env_or("TSUMUGI_CHECKPOINT_PATH", "checkpoint.txt"),
            sweep_delay: Duration::from_millis(env_parse("TSUMUGI_SWEEP_DELAY_MS", 2000u64)?),
            max_retries: env_parse("TSUMUGI_MAX_RETRIES", 3u32)?,
            base_delay: Duration::from_millis(env_parse("TSUMUGI_BASE_DELAY_MS", 1000u64)?),
            max_delay: Duration::from_millis(env_parse("TSUMUGI_MAX_DELAY_MS", 60_000u64)?),
            admin_secret: env::var("TSUMUGI_ADMIN_SECRET").ok(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| AppError::InvalidInput(format!("{} is not a valid number: {}", key, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parse_falls_back_to_default() {
        assert_eq!(env_parse("TSUMUGI_TEST_UNSET_KEY", 42u32).unwrap(), 42);
    }

    #[test]
    fn env_parse_rejects_garbage() {
        env::set_var("TSUMUGI_TEST_GARBAGE_KEY", "not-a-number");
        assert!(env_parse("TSUMUGI_TEST_GARBAGE_KEY", 0u64).is_err());
        env::remove_var("TSUMUGI_TEST_GARBAGE_KEY");
    }

    #[test]
    fn env_parse_rejects_values_out_of_range_for_the_target_type() {
        // would silently truncate under a cast; must error instead
        env::set_var("TSUMUGI_TEST_RANGE_KEY", "4294967296");
        assert!(env_parse("TSUMUGI_TEST_RANGE_KEY", 3u32).is_err());
        env::remove_var("TSUMUGI_TEST_RANGE_KEY");
    }
}
