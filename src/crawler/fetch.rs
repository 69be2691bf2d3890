use log2::*;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use super::config::CrawlerConfig;

/// Browser User-Agent strings, one picked at random per attempt.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.93 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.101 Safari/537.36",
];

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Headers for one fetch attempt. The User-Agent is re-rolled on every call,
/// so retries of the same page present a different fingerprint.
pub fn request_headers() -> HeaderMap {
    let agent = USER_AGENTS[rand::thread_rng().gen_range(0..USER_AGENTS.len())];

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(agent));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers
}

/// Why an attempt failed in a way worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryKind {
    /// HTTP 403 or 409, the site pushing back on the client.
    RateLimited(StatusCode),
    /// The attempt exceeded the configured request timeout, whether it
    /// stalled before the status line or while the body streamed.
    TimedOut,
    /// Connection-level failure, before the status line or mid-body.
    Transport,
}

impl fmt::Display for RetryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryKind::RateLimited(status) => write!(f, "status {}", status),
            RetryKind::TimedOut => write!(f, "timeout"),
            RetryKind::Transport => write!(f, "transport error"),
        }
    }
}

/// A complete 200 response, buffered in full: the declared content type
/// (empty when the header is absent or unreadable) and the decoded body.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub content_type: String,
    pub body: String,
}

/// Classification of a single GET attempt.
pub enum FetchOutcome {
    /// HTTP 200 with the whole body read.
    Success(FetchedPage),
    /// Worth another attempt after a backoff sleep.
    Retryable(RetryKind),
    /// Any other status, terminal for this page.
    Failure(StatusCode),
}

fn classify_error(error: &reqwest::Error) -> RetryKind {
    if error.is_timeout() {
        RetryKind::TimedOut
    } else {
        RetryKind::Transport
    }
}

/// Settle one attempt: check the status, then read the whole body while the
/// attempt's timeout is still armed. A connection that goes quiet mid-body
/// fails the attempt the same way one that never answers does.
async fn classify(result: Result<Response, reqwest::Error>) -> FetchOutcome {
    let response = match result {
        Ok(response) => response,
        Err(error) => return FetchOutcome::Retryable(classify_error(&error)),
    };

    let status = response.status();
    if status == StatusCode::FORBIDDEN || status == StatusCode::CONFLICT {
        return FetchOutcome::Retryable(RetryKind::RateLimited(status));
    }
    if status != StatusCode::OK {
        return FetchOutcome::Failure(status);
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    match response.text().await {
        Ok(body) => FetchOutcome::Success(FetchedPage { content_type, body }),
        Err(error) => FetchOutcome::Retryable(classify_error(&error)),
    }
}

/// Terminal result for a page whose fetch never produced a 200 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// Every allowed attempt ended in a retryable failure.
    Exhausted(RetryKind),
    /// A non-200 status outside the retryable set.
    Status(StatusCode),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Exhausted(kind) => write!(f, "retries exhausted ({})", kind),
            FetchFailure::Status(status) => write!(f, "status {}", status),
        }
    }
}

/// Jitter window in milliseconds for the sleep before the next attempt.
/// Rate-limit responses back off longer than network-level failures.
pub fn backoff_window_ms(kind: RetryKind) -> (u64, u64) {
    match kind {
        RetryKind::RateLimited(_) => (2_000, 5_000),
        RetryKind::TimedOut | RetryKind::Transport => (1_000, 3_000),
    }
}

fn backoff_delay(kind: RetryKind) -> Duration {
    let (low, high) = backoff_window_ms(kind);
    Duration::from_millis(rand::thread_rng().gen_range(low..=high))
}

/// GET `url` and buffer its whole body, retrying rate-limit and network
/// failures with jittered backoff until a complete 200 arrives or
/// `retry_count` attempts are spent. The per-attempt timeout covers the body
/// read, so a response that stalls after its headers is retried too.
/// Terminal statuses fail immediately without retry. Failure here means the
/// page is skipped, never that the crawl stops.
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    config: &CrawlerConfig,
) -> Result<FetchedPage, FetchFailure> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let result = client
            .get(url.clone())
            .headers(request_headers())
            .timeout(Duration::from_secs(config.request_timeout_sec))
            .send()
            .await;

        match classify(result).await {
            FetchOutcome::Success(page) => return Ok(page),
            FetchOutcome::Failure(status) => {
                error!("Request failed: {}, status: {}", url, status);
                return Err(FetchFailure::Status(status));
            }
            FetchOutcome::Retryable(kind) => {
                if attempt >= config.retry_count {
                    error!("Giving up on {} after {} attempts ({})", url, attempt, kind);
                    return Err(FetchFailure::Exhausted(kind));
                }
                warn!(
                    "Fetch of {} hit {}, retrying ({}/{})",
                    url, kind, attempt, config.retry_count
                );
                sleep(backoff_delay(kind)).await;
            }
        }
    }
}
