use log2::*;
use url::Url;

use super::engine::SkipReason;

/// One step of a crawl, reported as it happens. Round numbers start at 1.
#[derive(Debug, Clone)]
pub enum CrawlEvent {
    SeedStarted { seed: Url },
    RoundStarted { round: usize, scheduled: usize },
    PageCrawled { url: Url },
    PageSkipped { url: Url, reason: SkipReason },
    RoundFinished { round: usize, pages_crawled: usize },
    SeedFinished { seed: Url, pages_crawled: usize },
}

/// Receiver for crawl progress. The engine reports page outcomes and round
/// boundaries here rather than logging them itself.
pub trait CrawlObserver: Send + Sync {
    fn on_event(&self, event: &CrawlEvent);
}

/// Observer that forwards every event to the process log.
pub struct LogObserver;

impl CrawlObserver for LogObserver {
    fn on_event(&self, event: &CrawlEvent) {
        match event {
            CrawlEvent::SeedStarted { seed } => info!("Starting crawl of {}", seed),
            CrawlEvent::RoundStarted { round, scheduled } => {
                debug!("Round {}: dispatching {} pages", round, scheduled)
            }
            CrawlEvent::PageCrawled { url } => info!("Crawled {}", url),
            CrawlEvent::PageSkipped { url, reason } => warn!("Skipped {}: {}", url, reason),
            CrawlEvent::RoundFinished { round, pages_crawled } => {
                debug!("Round {} finished, {} pages so far", round, pages_crawled)
            }
            CrawlEvent::SeedFinished { seed, pages_crawled } => {
                info!("Finished {}: {} pages crawled", seed, pages_crawled)
            }
        }
    }
}
