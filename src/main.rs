use anyhow::Result;
use log2::*;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

use webcorpus::config::Config;
use webcorpus::crawler::{CrawlerConfigRef, LogObserver, crawl_site};
use webcorpus::output::{CorpusFile, corpus_filename};

/// Start time of the whole run, lazily initialized
pub static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = *START_TIME;
    let cfg = Config::new();
    cfg.validate()?;
    let _log2 = stdout()
        .module(true)
        .module_with_line(true)
        .module_filter(|module| module.starts_with("webcorpus"))
        .compress(false)
        .level(cfg.log_level.to_string())
        .start();

    std::fs::create_dir_all(&cfg.output_dir)?;

    let crawler_config: CrawlerConfigRef = Arc::new(cfg.crawler_config());
    let observer = LogObserver;
    let mut total_pages = 0;

    // Seeds are crawled one after another; only pages within a seed's crawl
    // run in parallel. A broken seed never stops the rest of the run.
    for base_url in &cfg.base_urls {
        let seed = match Url::parse(base_url) {
            Ok(url) => url,
            Err(e) => {
                error!("Skipping seed {}: {}", base_url, e);
                continue;
            }
        };

        let file_name = match corpus_filename(&seed) {
            Some(name) => name,
            None => {
                error!("Skipping seed {}: no host to name its corpus after", seed);
                continue;
            }
        };
        let path = cfg.output_dir.join(&file_name);

        let mut sink = match CorpusFile::create(&path) {
            Ok(sink) => sink,
            Err(e) => {
                error!("Skipping seed {}: {}", seed, e);
                continue;
            }
        };

        match crawl_site(seed.clone(), Arc::clone(&crawler_config), &mut sink, &observer).await {
            Ok(pages) => {
                total_pages += pages;
                info!("Saved {} pages from {} to {}", pages, seed, path.display());
            }
            Err(e) => {
                error!("Crawl of {} failed: {}", seed, e);
            }
        }
    }

    info!(
        "Run finished: {} pages total in {:?}",
        total_pages,
        START_TIME.elapsed()
    );

    Ok(())
}
