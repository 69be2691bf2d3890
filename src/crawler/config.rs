use std::sync::Arc;

/// Default timeout for a single page request in seconds
pub const PAGE_REQUEST_TIMEOUT_SEC: u64 = 10;

/// Engine-side knobs for a crawl. One instance is shared by every seed;
/// the seed URL itself is passed to `crawl_site`.
pub struct CrawlerConfig {
    pub max_pages: usize,
    pub max_workers: usize,
    pub retry_count: usize,
    pub request_timeout_sec: u64,
}

impl CrawlerConfig {
    pub fn new() -> Self {
        Self {
            max_pages: 30,
            max_workers: 5,
            retry_count: 3,
            request_timeout_sec: PAGE_REQUEST_TIMEOUT_SEC,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_retry_count(mut self, retry_count: usize) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_timeout_sec(mut self, request_timeout_sec: u64) -> Self {
        self.request_timeout_sec = request_timeout_sec;
        self
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub type CrawlerConfigRef = Arc<CrawlerConfig>;
