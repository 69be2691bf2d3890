use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use url::Url;

use crate::crawler::{CrawlResult, PageSink};

/// Strip the ASCII control characters that have no place in a text corpus.
/// Tab, newline and carriage return stay; the rest of 0x00-0x1F and DEL go.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                c,
                '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'
            )
        })
        .collect()
}

/// The `host:port` part of a URL as the parsed URL carries it. Default ports
/// never show up because parsing already dropped them. `None` for URLs
/// without a host, which cannot name a corpus.
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// File name for one seed's corpus: its authority plus `.txt`.
pub fn corpus_filename(url: &Url) -> Option<String> {
    Some(format!("{}.txt", authority(url)?))
}

fn render_page(page: &CrawlResult) -> String {
    let title = sanitize_text(&page.title);
    let body = sanitize_text(&page.body_text);
    format!(
        "{} ({}):\n    {}\n\n",
        title,
        page.url,
        body.replace('\n', "\n    ")
    )
}

/// Writes one seed's pages to a text file as the crawl produces them.
/// Creating the file truncates whatever a previous run left behind.
pub struct CorpusFile {
    file: File,
}

impl CorpusFile {
    pub fn create(path: &Path) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        Ok(Self { file })
    }
}

impl PageSink for CorpusFile {
    fn write_page(&mut self, page: &CrawlResult) -> Result<()> {
        self.file.write_all(render_page(page).as_bytes())?;
        Ok(())
    }
}
