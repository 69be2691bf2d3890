use once_cell::sync::Lazy;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::engine::CrawlResult;
use super::frontier::same_authority;

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Tags whose entire subtree is excluded from body text.
const STRIPPED_TAGS: &[&str] = &["script", "style", "noscript"];

/// Resolve an href against the page that referenced it. Absolute URLs pass
/// through untouched, anything else joins onto `base`. No further
/// canonicalization: hrefs resolving to different bytes stay distinct.
pub fn resolve_link(href: &str, base: &Url) -> Result<Url, url::ParseError> {
    let href = href.trim();
    match Url::parse(href) {
        Ok(parsed) if parsed.host().is_some() => Ok(parsed),
        _ => base.join(href),
    }
}

fn collect_text(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.text.trim();
                if !trimmed.is_empty() {
                    lines.push(trimmed.to_string());
                }
            }
            Node::Element(child_element) => {
                if STRIPPED_TAGS.contains(&child_element.name()) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(child_ref, lines);
                }
            }
            _ => {}
        }
    }
}

/// Parse a fetched page into its title, flattened body text, and the
/// same-authority links it references, in document order.
///
/// The title falls back to the page URL when the document carries no
/// `<title>` element. Body text is every text node outside script, style
/// and noscript subtrees, each trimmed, joined with newlines. Duplicate
/// links are kept; admission control belongs to the frontier.
pub fn extract_page(html: &str, url: &Url) -> CrawlResult {
    let document = Html::parse_document(html);

    let title = match document.select(&TITLE_SELECTOR).next() {
        Some(element) => element.text().collect::<String>().trim().to_string(),
        None => url.to_string(),
    };

    let mut lines = Vec::new();
    collect_text(document.root_element(), &mut lines);
    let body_text = lines.join("\n");

    let mut links = Vec::new();
    for element in document.select(&LINK_SELECTOR) {
        if let Some(href) = element.value().attr("href") {
            if let Ok(resolved) = resolve_link(href, url) {
                if same_authority(&resolved, url) {
                    links.push(resolved);
                }
            }
        }
    }

    CrawlResult {
        url: url.clone(),
        title,
        body_text,
        links,
    }
}
