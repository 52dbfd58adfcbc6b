mod retry_client;
mod retry_policy;

pub use retry_client::RetryClient;
pub use retry_policy::{is_retryable_error, parse_rate_limit_value, RetryPolicy};
