use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use log2::*;
use reqwest::Client;
use tokio::task::JoinHandle;
use url::Url;

use super::config::CrawlerConfigRef;
use super::events::{CrawlEvent, CrawlObserver};
use super::extract::extract_page;
use super::fetch::{FetchFailure, fetch_page};
use super::frontier::Frontier;

/// One fetched-and-parsed page: what it said and where it pointed.
#[derive(Debug, Clone)]
pub struct CrawlResult {
    pub url: Url,
    pub title: String,
    pub body_text: String,
    pub links: Vec<Url>,
}

/// Why a drawn URL produced no page.
#[derive(Debug, Clone)]
pub enum SkipReason {
    /// The fetch never yielded a complete 200 response.
    Fetch(FetchFailure),
    /// 200 arrived but the declared content type is not HTML.
    NotHtml(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Fetch(failure) => write!(f, "{}", failure),
            SkipReason::NotHtml(content_type) => write!(f, "not HTML: {:?}", content_type),
        }
    }
}

/// What one worker task hands back to the scheduler.
#[derive(Debug)]
pub enum PageOutcome {
    Page(CrawlResult),
    Skipped { url: Url, reason: SkipReason },
}

/// Destination for crawled pages. The engine calls this between rounds only,
/// never from worker tasks.
pub trait PageSink {
    fn write_page(&mut self, page: &CrawlResult) -> Result<()>;
}

/// Coarse binary-content filter: any URL whose serialized form ends in
/// `.pdf`, case-insensitive.
pub(crate) fn has_pdf_suffix(url: &str) -> bool {
    url.to_ascii_lowercase().ends_with(".pdf")
}

/// Fetch one page and parse it. Runs as a spawned task; every failure is
/// folded into the returned outcome, so a bad page never takes the crawl
/// down with it.
async fn crawl_page(client: Client, url: Url, config: CrawlerConfigRef) -> PageOutcome {
    let fetched = match fetch_page(&client, &url, &config).await {
        Ok(fetched) => fetched,
        Err(failure) => {
            return PageOutcome::Skipped {
                url,
                reason: SkipReason::Fetch(failure),
            };
        }
    };

    // media types are case-insensitive
    if !fetched.content_type.to_ascii_lowercase().contains("text/html") {
        return PageOutcome::Skipped {
            url,
            reason: SkipReason::NotHtml(fetched.content_type),
        };
    }

    PageOutcome::Page(extract_page(&fetched.body, &url))
}

/// Crawl one seed breadth-first until the page budget or the frontier is
/// exhausted, writing each crawled page to `sink` as soon as its round
/// collects it.
///
/// Pages are fetched in rounds of at most `max_workers` parallel tasks, and
/// every round is capped so the budget cannot be overshot even if the whole
/// batch succeeds. The frontier, the sink and the observer are touched only
/// from this function, never from worker tasks; workers share nothing but
/// the HTTP client.
///
/// Returns the number of pages written.
pub async fn crawl_site(
    seed: Url,
    config: CrawlerConfigRef,
    sink: &mut dyn PageSink,
    observer: &dyn CrawlObserver,
) -> Result<usize> {
    let client = Client::new();
    let mut frontier = Frontier::new(seed.clone());
    let mut pages_crawled: usize = 0;
    let mut round: usize = 0;

    observer.on_event(&CrawlEvent::SeedStarted { seed: seed.clone() });

    loop {
        let remaining = config.max_pages.saturating_sub(pages_crawled);
        if remaining == 0 {
            break;
        }

        let batch = frontier.draw_batch(remaining.min(config.max_workers));
        if batch.is_empty() {
            break;
        }

        round += 1;
        observer.on_event(&CrawlEvent::RoundStarted {
            round,
            scheduled: batch.len(),
        });

        let mut handles: Vec<JoinHandle<PageOutcome>> = Vec::new();
        for url in batch {
            let client = client.clone();
            let config = Arc::clone(&config);
            handles.push(tokio::spawn(crawl_page(client, url, config)));
        }

        for handle in handles {
            match handle.await? {
                PageOutcome::Page(page) => {
                    // report the page only once the corpus actually holds it
                    sink.write_page(&page)?;
                    pages_crawled += 1;
                    observer.on_event(&CrawlEvent::PageCrawled {
                        url: page.url.clone(),
                    });

                    for link in page.links {
                        if has_pdf_suffix(link.as_str()) {
                            debug!("Skipping binary link {}", link);
                            continue;
                        }
                        if frontier.enqueue(link.clone()) {
                            debug!("Queued {}", link);
                        }
                    }
                }
                PageOutcome::Skipped { url, reason } => {
                    observer.on_event(&CrawlEvent::PageSkipped { url, reason });
                }
            }
        }

        observer.on_event(&CrawlEvent::RoundFinished {
            round,
            pages_crawled,
        });
        debug!("{} pending urls after round {}", frontier.pending(), round);
    }

    observer.on_event(&CrawlEvent::SeedFinished {
        seed,
        pages_crawled,
    });
    Ok(pages_crawled)
}
