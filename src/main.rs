use std::process::ExitCode;
use std::sync::Arc;

use tsumugi::modules::anime::domain::services::reconciliation::ReconciliationEngine;
use tsumugi::modules::anime::domain::services::save_policy::SavePolicy;
use tsumugi::modules::anime::infrastructure::{MemoryCache, MemoryStore};
use tsumugi::modules::crawler::{CrawlController, FileCheckpointStore, RemoteIdList};
use tsumugi::modules::provider::infrastructure::adapters::{
    AniListAdapter, AniZipAdapter, MalSyncAdapter, ScraperAdapter,
};
use tsumugi::modules::provider::infrastructure::http_client::RetryPolicy;
use tsumugi::modules::provider::traits::ScraperClient;
use tsumugi::shared::errors::AppResult;
use tsumugi::shared::utils::logger::init_logger;
use tsumugi::shared::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logger();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("crawl aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let config = AppConfig::from_env()?;
    let policy = RetryPolicy::new(config.max_retries, config.base_delay, config.max_delay);

    let scrapers: Vec<Arc<dyn ScraperClient>> = vec![
        Arc::new(ScraperAdapter::gogoanime(
            &config.gogoanime_url,
            policy.clone(),
        )?),
        Arc::new(ScraperAdapter::zoro(&config.zoro_url, policy.clone())?),
    ];
    let engine = ReconciliationEngine::new(
        Arc::new(AniListAdapter::new(&config.anilist_url, policy.clone())?),
        Arc::new(AniZipAdapter::new(&config.anizip_url, policy.clone())?),
        Arc::new(MalSyncAdapter::new(&config.malsync_url, policy.clone())?),
        scrapers,
    );

    let controller = CrawlController::new(
        Arc::new(RemoteIdList::new(&config.id_list_url, policy)?),
        Arc::new(engine),
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryCache::new()),
        Arc::new(FileCheckpointStore::new(&config.checkpoint_path)),
        SavePolicy::default(),
        config.sweep_delay,
    );

    controller.run().await?;
    Ok(())
}
