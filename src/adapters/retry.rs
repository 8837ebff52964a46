//! Shared HTTP plumbing for provider clients
//!
//! Bounded retries with backoff for 429, 5xx and transport errors. Other
//! non-success statuses fail immediately. The analyzer's per-fetch timeout
//! still bounds the total time spent here.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::ports::ProviderError;

/// Longest response body echoed into an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Shortest per-attempt timeout handed to a client
const MIN_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(1);

/// Retry behaviour for provider requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Base delay for backoff
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Total attempts including the first
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Slice of a whole-fetch budget given to each attempt
    ///
    /// A hung first attempt must time out early enough for the retry to run
    /// before the caller's deadline.
    pub fn attempt_timeout(&self, budget: Duration) -> Duration {
        (budget / self.attempts()).max(MIN_ATTEMPT_TIMEOUT)
    }

    /// Exponential backoff used after a 429
    pub fn rate_limit_backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt + 1))
    }

    /// Linear backoff used after server and transport errors
    pub fn linear_backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt + 1)
    }
}

/// Build a reqwest client with a request timeout
pub fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Execute a request with retry logic and backoff
pub async fn send_with_retry<F, Fut>(
    policy: &RetryPolicy,
    provider: &str,
    request_fn: F,
) -> Result<Response, ProviderError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    let attempts = policy.attempts();
    let mut last_error = None;

    for attempt in 0..attempts {
        let is_last = attempt + 1 == attempts;

        let backoff = match request_fn().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return Ok(response);
                }

                if status == StatusCode::TOO_MANY_REQUESTS {
                    last_error = Some(ProviderError::RateLimited);
                    policy.rate_limit_backoff(attempt)
                } else if status.is_server_error() {
                    last_error = Some(status_error(response).await);
                    policy.linear_backoff(attempt)
                } else {
                    return Err(status_error(response).await);
                }
            }
            Err(e) => {
                last_error = Some(ProviderError::Http(e));
                policy.linear_backoff(attempt)
            }
        };

        if !is_last {
            tracing::debug!(
                "{} request failed (attempt {}/{}), retrying in {:?}",
                provider,
                attempt + 1,
                attempts,
                backoff
            );
            tokio::time::sleep(backoff).await;
        }
    }

    Err(last_error.unwrap_or(ProviderError::Status {
        status: 0,
        body: "max retries exceeded".to_string(),
    }))
}

/// Decode a JSON body
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ProviderError::Parse(format!("Failed to parse JSON: {}", e)))
}

async fn status_error(response: Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ProviderError::Status {
        status,
        body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}
