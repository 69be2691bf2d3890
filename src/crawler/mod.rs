pub mod config;
pub mod frontier;
pub mod fetch;
pub mod extract;
pub mod engine;
pub mod events;


pub use config::{CrawlerConfig, CrawlerConfigRef, PAGE_REQUEST_TIMEOUT_SEC};
pub use engine::{CrawlResult, PageOutcome, PageSink, SkipReason, crawl_site};
pub use events::{CrawlEvent, CrawlObserver, LogObserver};
pub use extract::{extract_page, resolve_link};
pub use fetch::{
    FetchFailure, FetchOutcome, FetchedPage, RetryKind, backoff_window_ms, fetch_page,
    request_headers,
};
pub use frontier::{Frontier, same_authority};
