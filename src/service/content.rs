//! Content scanner: keyword and outbound-link harvesting from raw markup
//!
//! Fetches the page once and derives a frequency-ranked keyword list, an
//! external-link list, and the structural scan used for competitive
//! comparison. Network or parse failure yields empty results, never an error.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::model::SiteScan;

const USER_AGENT: &str = "seo-audit-agent/1.0";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_KEYWORDS: usize = 20;
const MAX_BACKLINKS: usize = 10;
const MIN_KEYWORD_LEN: usize = 3;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use",
];

/// Keyword and backlink lists for a single page
#[derive(Debug, Clone, Default)]
pub struct ContentScan {
    pub keywords: Vec<String>,
    pub backlinks: Vec<String>,
}

#[derive(Clone)]
pub struct ContentScanner {
    client: Client,
}

impl ContentScanner {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(FETCH_TIMEOUT)
                .build()?,
        })
    }

    /// Keyword/backlink scan. Failure yields empty lists.
    pub async fn scan(&self, url: &str) -> ContentScan {
        match self.fetch(url).await {
            Ok(body) => {
                let scan = parse_site(url, &body);
                ContentScan {
                    keywords: scan.keywords,
                    backlinks: scan.backlinks,
                }
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Content scan failed, returning empty lists");
                ContentScan::default()
            }
        }
    }

    /// Full structural scan for competitive comparison. Failure yields an
    /// empty scan with the `error` field populated.
    pub async fn site_scan(&self, url: &str) -> SiteScan {
        match self.fetch(url).await {
            Ok(body) => parse_site(url, &body),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Site scan failed");
                SiteScan::failed(url, e.to_string())
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// Parse raw markup into the structural scan. Pure.
pub fn parse_site(url: &str, body: &str) -> SiteScan {
    let document = Html::parse_document(body);

    let title = select_text(&document, "title");
    let meta_description = select_attr(&document, "meta[name=\"description\"]", "content");

    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    let word_count = text.split_whitespace().count();

    let combined = format!("{} {} {}", title, meta_description, text);
    let keywords = rank_keywords(&combined);

    let (backlinks, internal_links) = extract_links(url, &document);

    SiteScan {
        url: url.to_string(),
        title,
        meta_description,
        keywords,
        backlinks,
        h1_count: count_elements(&document, "h1"),
        h2_count: count_elements(&document, "h2"),
        h3_count: count_elements(&document, "h3"),
        word_count,
        internal_links,
        error: None,
    }
}

fn select_text(document: &Html, selector: &str) -> String {
    if let Ok(selector) = Selector::parse(selector) {
        if let Some(el) = document.select(&selector).next() {
            return el.text().collect::<String>().trim().to_string();
        }
    }
    String::new()
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> String {
    if let Ok(selector) = Selector::parse(selector) {
        if let Some(el) = document.select(&selector).next() {
            return el.value().attr(attr).unwrap_or_default().trim().to_string();
        }
    }
    String::new()
}

fn count_elements(document: &Html, selector: &str) -> usize {
    match Selector::parse(selector) {
        Ok(selector) => document.select(&selector).count(),
        Err(_) => 0,
    }
}

/// Lower-case alphabetic tokens of length >= 3, minus stop words, ranked by
/// frequency descending with ties broken by first occurrence. Top 20.
pub fn rank_keywords(text: &str) -> Vec<String> {
    let word_re = Regex::new(r"[a-zA-Z]+").expect("static regex");

    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (index, token) in word_re.find_iter(&text.to_lowercase()).enumerate() {
        let word = token.as_str();
        if word.len() < MIN_KEYWORD_LEN || STOP_WORDS.contains(&word) {
            continue;
        }
        let entry = counts.entry(word.to_string()).or_insert((0, index));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}

/// Anchor targets split into external backlinks (http/https, foreign host,
/// deduplicated, capped) and an internal-link count. Internal means a
/// relative reference or an absolute http(s) link back to the source host;
/// non-web schemes (mailto, tel, javascript) count as neither.
fn extract_links(source_url: &str, document: &Html) -> (Vec<String>, usize) {
    let source_host = Url::parse(source_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()));

    let mut backlinks = Vec::new();
    let mut seen = HashSet::new();
    let mut internal = 0;

    if let Ok(selector) = Selector::parse("a[href]") {
        for el in document.select(&selector) {
            let Some(href) = el.value().attr("href") else {
                continue;
            };

            let Ok(target) = Url::parse(href) else {
                // Relative reference, resolves within the source site
                internal += 1;
                continue;
            };
            if target.scheme() != "http" && target.scheme() != "https" {
                continue;
            }

            let external = match (&source_host, target.host_str()) {
                (Some(source), Some(target_host)) => source != target_host,
                _ => true,
            };

            if !external {
                internal += 1;
            } else if seen.insert(href.to_string()) && backlinks.len() < MAX_BACKLINKS {
                backlinks.push(href.to_string());
            }
        }
    }

    (backlinks, internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
        <html>
        <head>
            <title>Coffee Roasting Guide</title>
            <meta name="description" content="Roasting coffee beans at home">
        </head>
        <body>
            <h1>Coffee Roasting</h1>
            <h2>Equipment</h2>
            <h2>Process</h2>
            <p>Roasting coffee transforms green beans. Coffee flavor develops
               during roasting and the beans change color.</p>
            <a href="/about">About</a>
            <a href="https://en.wikipedia.org/wiki/Coffee">Wikipedia</a>
            <a href="https://example.com/page">Same host</a>
            <a href="https://en.wikipedia.org/wiki/Coffee">Duplicate</a>
            <a href="mailto:hi@example.com">Mail</a>
        </body>
        </html>"#;

    #[test]
    fn parse_site_extracts_structure() {
        let scan = parse_site("https://example.com/", PAGE);
        assert_eq!(scan.title, "Coffee Roasting Guide");
        assert_eq!(scan.meta_description, "Roasting coffee beans at home");
        assert_eq!(scan.h1_count, 1);
        assert_eq!(scan.h2_count, 2);
        assert_eq!(scan.h3_count, 0);
        assert!(scan.word_count > 10);
        // "/about" plus the same-host absolute link; mailto is neither
        assert_eq!(scan.internal_links, 2);
        assert!(scan.error.is_none());
    }

    #[test]
    fn non_web_schemes_are_not_internal_links() {
        let body = r#"<html><body>
            <a href="mailto:hi@example.com">Mail</a>
            <a href="tel:+15551234">Call</a>
            <a href="javascript:void(0)">Click</a>
            <a href="/contact">Contact</a>
        </body></html>"#;
        let scan = parse_site("https://example.com/", body);
        assert_eq!(scan.internal_links, 1);
        assert!(scan.backlinks.is_empty());
    }

    #[test]
    fn scanner_construction_succeeds() {
        assert!(ContentScanner::new().is_ok());
    }

    #[test]
    fn backlinks_are_external_deduplicated_and_scheme_filtered() {
        let scan = parse_site("https://example.com/", PAGE);
        assert_eq!(scan.backlinks, vec!["https://en.wikipedia.org/wiki/Coffee"]);
    }

    #[test]
    fn keywords_ranked_by_frequency() {
        let scan = parse_site("https://example.com/", PAGE);
        // "coffee" and "roasting" dominate; "coffee" appears first in the text
        assert_eq!(scan.keywords[0], "coffee");
        assert_eq!(scan.keywords[1], "roasting");
        assert!(!scan.keywords.iter().any(|k| k == "the"));
    }

    #[test]
    fn rank_keywords_tie_broken_by_first_occurrence() {
        let keywords = rank_keywords("zebra apple zebra apple mango");
        assert_eq!(keywords, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn rank_keywords_drops_short_and_stop_words() {
        let keywords = rank_keywords("go the and ox banana");
        assert_eq!(keywords, vec!["banana"]);
    }

    #[test]
    fn rank_keywords_caps_at_twenty() {
        let text = (0..40)
            .map(|i| format!("keyword{:02}", i))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rank_keywords(&text).len(), 20);
    }

    #[test]
    fn backlink_cap_at_ten() {
        let mut body = String::from("<html><body>");
        for i in 0..15 {
            body.push_str(&format!("<a href=\"https://site{}.example.org/\">x</a>", i));
        }
        body.push_str("</body></html>");
        let scan = parse_site("https://example.com/", &body);
        assert_eq!(scan.backlinks.len(), 10);
    }

    #[test]
    fn failed_scan_shape() {
        let scan = SiteScan::failed("https://example.com/", "connect timeout".into());
        assert_eq!(scan.word_count, 0);
        assert!(scan.keywords.is_empty());
        assert_eq!(scan.error.as_deref(), Some("connect timeout"));
    }
}
