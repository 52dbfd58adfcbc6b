//! HTTP client with automatic rate limiting and retry logic.
//!
//! Every provider adapter funnels its outbound calls through this client so
//! rate-limit handling and backoff live in exactly one place.

use super::retry_policy::{is_retryable_error, RetryPolicy};
use crate::shared::errors::{AppError, AppResult};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;

pub struct RetryClient {
    client: Client,
    limiter: DefaultDirectRateLimiter,
    policy: RetryPolicy,
    source: String,
}

impl RetryClient {
    /// Client with default pacing (1 req/sec, burst of 3).
    pub fn new(source: &str, policy: RetryPolicy) -> AppResult<Self> {
        Self::with_pacing(source, policy, 1.0, 3)
    }

    /// Client with explicit token-bucket pacing in front of the retry loop.
    pub fn with_pacing(
        source: &str,
        policy: RetryPolicy,
        requests_per_second: f64,
        burst: u32,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent("tsumugi/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            limiter: create_rate_limiter(requests_per_second, burst),
            policy,
            source: source.to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Make a GET request and deserialize the JSON body
    pub async fn get_json<T>(&self, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.request(Method::GET, url, None).await?;
        self.parse_response(response).await
    }

    /// Make a POST request with a JSON body and deserialize the response
    pub async fn post_json<T>(&self, url: &str, body: &Value) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.request(Method::POST, url, Some(body)).await?;
        self.parse_response(response).await
    }

    /// Make a GET request and return the raw body text
    pub async fn get_text(&self, url: &str) -> AppResult<String> {
        let response = self.request(Method::GET, url, None).await?;
        response.text().await.map_err(|e| {
            AppError::ApiError(format!("Failed to read {} response: {}", self.source, e))
        })
    }

    /// Perform a request, transparently retrying transient failures.
    ///
    /// 429 and 5xx responses are retried while the per-request attempt count
    /// stays below the policy ceiling; other error statuses propagate
    /// immediately. The attempt counter lives on this call's stack, so
    /// concurrent requests back off independently.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> AppResult<Response> {
        let mut attempt: u32 = 0;

        loop {
            self.limiter.until_ready().await;

            match self.build_and_send(&method, url, body).await {
                Ok(response) => {
                    let status = response.status();

                    if status.as_u16() == 429 || status.is_server_error() {
                        if attempt < self.policy.max_retries {
                            let delay = self.policy.delay_for(attempt, response.headers());
                            log::warn!(
                                "{} returned {} (attempt {}/{}), retrying in {:?}",
                                self.source,
                                status,
                                attempt + 1,
                                self.policy.max_retries + 1,
                                delay
                            );
                            sleep(delay).await;
                            attempt += 1;
                            continue;
                        }
                        return Err(self.status_error(status));
                    }

                    if !status.is_success() {
                        return Err(self.status_error(status));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if is_retryable_error(&e) && attempt < self.policy.max_retries {
                        let delay = self
                            .policy
                            .delay_for(attempt, &reqwest::header::HeaderMap::new());
                        log::warn!(
                            "{} request failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.source,
                            attempt + 1,
                            self.policy.max_retries + 1,
                            e,
                            delay
                        );
                        sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(AppError::from(e));
                }
            }
        }
    }

    async fn build_and_send(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, reqwest::Error> {
        let mut request_builder = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json");

        if let Some(json_body) = body {
            request_builder = request_builder.json(json_body);
        }

        request_builder.send().await
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.source, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.source,
                e,
                body_preview(&response_text)
            ))
        })
    }

    fn status_error(&self, status: StatusCode) -> AppError {
        match status.as_u16() {
            429 => AppError::RateLimitError(format!(
                "{} rate limit exceeded after {} attempts",
                self.source,
                self.policy.max_retries + 1
            )),
            404 => AppError::NotFound(format!("{} resource not found", self.source)),
            401 | 403 => AppError::Unauthorized(format!("{} rejected the request", self.source)),
            _ => AppError::ApiError(format!("{} returned {}", self.source, status)),
        }
    }
}

/// First ~200 bytes of a body for error messages, cut on a char boundary so
/// multi-byte content cannot panic the formatter.
fn body_preview(body: &str) -> String {
    const LIMIT: usize = 200;
    if body.len() <= LIMIT {
        return body.to_string();
    }
    let mut cut = LIMIT;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}

fn create_rate_limiter(requests_per_second: f64, burst: u32) -> DefaultDirectRateLimiter {
    let period = if requests_per_second > 0.0 {
        Duration::from_secs_f64(1.0 / requests_per_second)
    } else {
        Duration::from_secs(1)
    };

    let burst = NonZeroU32::new(burst.max(1)).unwrap_or(NonZeroU32::MIN);
    let quota = Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
        .allow_burst(burst);

    RateLimiter::direct(quota)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = RetryClient::new("anilist", RetryPolicy::default()).unwrap();
        assert_eq!(client.source(), "anilist");
    }

    #[test]
    fn body_preview_cuts_multibyte_content_on_a_char_boundary() {
        // 'あ' is 3 bytes; byte 200 lands inside a character
        let body = format!("x{}", "あ".repeat(100));
        let preview = body_preview(&body);
        assert!(preview.ends_with("..."));
        assert!(preview.len() <= 203);

        let short = "plain ascii";
        assert_eq!(body_preview(short), short);
    }

    #[test]
    fn status_error_classification() {
        let client = RetryClient::new("zoro", RetryPolicy::default()).unwrap();
        assert!(matches!(
            client.status_error(StatusCode::TOO_MANY_REQUESTS),
            AppError::RateLimitError(_)
        ));
        assert!(matches!(
            client.status_error(StatusCode::NOT_FOUND),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            client.status_error(StatusCode::BAD_GATEWAY),
            AppError::ApiError(_)
        ));
    }
}
