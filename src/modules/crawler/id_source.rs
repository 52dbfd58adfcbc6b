//! Source of the id list driving a crawl sweep.

use crate::modules::provider::infrastructure::http_client::{RetryClient, RetryPolicy};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait IdSource: Send + Sync {
    /// The complete id list for this sweep. Unlike the per-id providers this
    /// call has no fallback: an error here aborts the whole run.
    async fn fetch(&self) -> AppResult<Vec<String>>;
}

/// Newline-delimited id list fetched over HTTP, fresh on every run.
pub struct RemoteIdList {
    client: RetryClient,
    url: String,
}

impl RemoteIdList {
    pub fn new(url: impl Into<String>, policy: RetryPolicy) -> AppResult<Self> {
        Ok(Self {
            client: RetryClient::new("id list", policy)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl IdSource for RemoteIdList {
    async fn fetch(&self) -> AppResult<Vec<String>> {
        let body = self.client.get_text(&self.url).await?;
        Ok(parse_id_list(&body))
    }
}

fn parse_id_list(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
