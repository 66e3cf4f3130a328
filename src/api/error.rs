//! HTTP failure classification and retry for backend calls.

use std::future::Future;
use std::time::Duration;

use reqwest::{Response, StatusCode};

use crate::error::ScopeError;

/// Default wait when the backend rate-limits without a `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// A non-2xx response from the backend.
#[derive(Debug, Clone)]
pub struct HttpFailure {
    pub status: StatusCode,
    /// `Retry-After` header value in seconds, if present
    pub retry_after: Option<u64>,
    /// Backend `detail` message, or `API Error: <status>`
    pub message: String,
}

impl HttpFailure {
    /// Read status, `Retry-After` and the `{detail}` body out of a failed response.
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());

        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail").and_then(|d| d.as_str()).map(str::to_string));

        Self {
            status,
            retry_after,
            message: detail.unwrap_or_else(|| format!("API Error: {}", status.as_u16())),
        }
    }

    pub fn is_transient(&self) -> bool {
        self.status.is_server_error()
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
    }
}

impl From<HttpFailure> for ScopeError {
    fn from(failure: HttpFailure) -> Self {
        if failure.is_rate_limited() {
            return ScopeError::RateLimited(failure.retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS));
        }
        ScopeError::Api {
            status: failure.status.as_u16(),
            message: failure.message,
        }
    }
}

/// Failure of one attempt.
#[derive(Debug)]
pub enum AttemptError {
    Http(HttpFailure),
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        AttemptError::Transport(err)
    }
}

impl From<AttemptError> for ScopeError {
    fn from(err: AttemptError) -> Self {
        match err {
            AttemptError::Http(failure) => failure.into(),
            AttemptError::Transport(err) => ScopeError::Http(err),
        }
    }
}

/// Retry discipline for server errors and rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// Upper bound on any single wait, including `Retry-After`
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// `base_delay * 2^(attempt - 1)`, saturating.
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// Wait before attempt `attempt + 1`, or `None` when `failure` is final.
    fn delay(&self, attempt: u32, failure: &HttpFailure) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        let delay = if failure.is_rate_limited() {
            failure
                .retry_after
                .map(Duration::from_secs)
                .unwrap_or_else(|| self.backoff(attempt))
        } else if failure.is_transient() {
            self.backoff(attempt)
        } else {
            return None;
        };
        Some(delay.min(self.max_delay))
    }
}

/// Run `attempt` until it succeeds, fails permanently, or attempts run out.
///
/// Only 5xx and 429 responses are retried; transport errors are returned
/// immediately.
pub async fn execute_with_retry<F, Fut>(
    policy: RetryPolicy,
    mut attempt: F,
) -> Result<Response, AttemptError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Response, AttemptError>>,
{
    let mut n = 1;
    loop {
        match attempt().await {
            Err(AttemptError::Http(failure)) => match policy.delay(n, &failure) {
                Some(wait) => {
                    tracing::debug!(
                        status = failure.status.as_u16(),
                        attempt = n,
                        "retrying backend request in {:?}",
                        wait
                    );
                    tokio::time::sleep(wait).await;
                    n += 1;
                }
                None => return Err(AttemptError::Http(failure)),
            },
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(status: u16, retry_after: Option<u64>) -> HttpFailure {
        HttpFailure {
            status: StatusCode::from_u16(status).unwrap(),
            retry_after,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_client_errors_are_final() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(1, &failure(404, None)), None);
    }

    #[test]
    fn test_server_errors_back_off_exponentially() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay(1, &failure(503, None)),
            Some(Duration::from_millis(500))
        );
        assert_eq!(
            policy.delay(2, &failure(503, None)),
            Some(Duration::from_millis(1000))
        );
        assert_eq!(policy.delay(3, &failure(503, None)), None);
    }

    #[test]
    fn test_long_policies_do_not_overflow() {
        let policy = RetryPolicy {
            max_attempts: 100,
            ..RetryPolicy::default()
        };
        assert_eq!(
            policy.delay(40, &failure(502, None)),
            Some(Duration::from_secs(10))
        );
        assert_eq!(
            policy.delay(99, &failure(429, None)),
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn test_retry_after_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay(1, &failure(429, Some(120))),
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn test_rate_limit_maps_to_scope_error() {
        let err: ScopeError = failure(429, None).into();
        assert!(matches!(err, ScopeError::RateLimited(60)));

        let err: ScopeError = failure(500, None).into();
        assert!(matches!(err, ScopeError::Api { status: 500, .. }));
    }
}
