//! Retry behavior against a local stub HTTP server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use tsumugi::modules::provider::infrastructure::http_client::{RetryClient, RetryPolicy};
use tsumugi::shared::errors::AppError;

/// Serve canned HTTP responses, one per connection, chosen by request count.
/// Returns the base URL and the shared request counter.
async fn stub_server(
    responses: impl Fn(usize) -> (u16, &'static str) + Send + Sync + 'static,
) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = counter.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let n = seen.fetch_add(1, Ordering::SeqCst);
            let (status, body) = responses(n);
            let reason = match status {
                200 => "OK",
                404 => "Not Found",
                429 => "Too Many Requests",
                500 => "Internal Server Error",
                _ => "Unknown",
            };

            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    (format!("http://{}", addr), counter)
}

fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(
        max_retries,
        Duration::from_millis(1),
        Duration::from_millis(50),
    )
}

fn fast_client(policy: RetryPolicy) -> RetryClient {
    RetryClient::with_pacing("stub", policy, 1000.0, 100).unwrap()
}

#[tokio::test]
async fn rate_limited_requests_retry_up_to_the_ceiling() {
    let (url, counter) = stub_server(|_| (429, "{}")).await;
    let client = fast_client(fast_policy(3));

    let result = client.get_text(&url).await;

    assert!(matches!(result, Err(AppError::RateLimitError(_))));
    // initial attempt plus max_retries
    assert_eq!(counter.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn server_errors_recover_on_a_later_attempt() {
    let (url, counter) = stub_server(|n| {
        if n < 2 {
            (500, "")
        } else {
            (200, "{\"ok\":true}")
        }
    })
    .await;
    let client = fast_client(fast_policy(3));

    let body = client.get_text(&url).await.unwrap();

    assert_eq!(body, "{\"ok\":true}");
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn client_errors_fail_immediately_without_retry() {
    let (url, counter) = stub_server(|_| (404, "")).await;
    let client = fast_client(fast_policy(3));

    let result = client.get_text(&url).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn zero_retries_means_exactly_one_request() {
    let (url, counter) = stub_server(|_| (500, "")).await;
    let client = fast_client(fast_policy(0));

    let result = client.get_text(&url).await;

    assert!(matches!(result, Err(AppError::ApiError(_))));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unparseable_multibyte_body_reports_a_parse_error() {
    // 301 bytes, with a 3-byte character straddling the preview cutoff
    let body: &'static str = Box::leak(format!("x{}", "あ".repeat(100)).into_boxed_str());
    let (url, _) = stub_server(move |_| (200, body)).await;
    let client = fast_client(fast_policy(0));

    let result = client.get_json::<serde_json::Value>(&url).await;

    assert!(matches!(result, Err(AppError::SerializationError(_))));
}

#[tokio::test]
async fn json_helper_deserializes_the_body() {
    let (url, _) = stub_server(|_| (200, "{\"id\": 21}")).await;
    let client = fast_client(fast_policy(0));

    let value: serde_json::Value = client.get_json(&url).await.unwrap();

    assert_eq!(value["id"], 21);
}
