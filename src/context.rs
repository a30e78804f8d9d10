//! Web context resolution.
//!
//! The retrieval-augmented path grounds answers in text scraped from the
//! vendor site. [`WebContextResolver`] fetches a page (10 s timeout, raced
//! against the cancellation token), extracts the main content region, and
//! falls back to a secondary URL when the page yields too little text.
//! Extracted text is cached per URL in an injected [`PageCache`].

use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use rustc_hash::FxHashMap;
use scraper::{Html, Selector};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::config::{CACHE_TTL, FETCH_TIMEOUT, MIN_CONTEXT_LENGTH};
use crate::errors::AssistantError;

/// Extracted page text ready for prompt construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextResult {
    /// Collapsed plain text of the page's main content region.
    pub text: String,
    /// URL the text actually came from (the fallback URL if it was used).
    pub source_url: String,
    /// Whether the secondary URL had to be used.
    pub used_fallback: bool,
}

struct CacheEntry {
    result: ContextResult,
    fetched_at: Instant,
}

/// Expiring cache of extracted page text, keyed by requested URL.
pub struct PageCache {
    ttl: Duration,
    entries: Mutex<FxHashMap<String, CacheEntry>>,
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(CACHE_TTL)
    }
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    /// Fetch a cached result, dropping it if it has expired.
    pub fn get(&self, url: &str) -> Option<ContextResult> {
        let mut entries = self.entries.lock().expect("page cache poisoned");
        match entries.get(url) {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => Some(entry.result.clone()),
            Some(_) => {
                entries.remove(url);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, url: impl Into<String>, result: ContextResult) {
        let mut entries = self.entries.lock().expect("page cache poisoned");
        entries.insert(
            url.into(),
            CacheEntry {
                result,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry.
    pub fn prune(&self) {
        let mut entries = self.entries.lock().expect("page cache poisoned");
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);
    }

    pub fn clear(&self) {
        self.entries.lock().expect("page cache poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("page cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Seam for context retrieval: the orchestrator talks to this trait, tests
/// substitute scripted sources.
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn get_context(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<ContextResult, AssistantError>;
}

/// Fetches and extracts page text over HTTP.
pub struct WebContextResolver {
    client: Client,
    cache: PageCache,
    fallback_url: String,
    min_length: usize,
}

impl WebContextResolver {
    pub fn new(fallback_url: impl Into<String>) -> Result<Self, AssistantError> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            cache: PageCache::default(),
            fallback_url: fallback_url.into(),
            min_length: MIN_CONTEXT_LENGTH,
        })
    }

    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = cache;
        self
    }

    /// Override the short-content threshold (tests).
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn fetch_body(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, AssistantError> {
        Url::parse(url).map_err(|err| AssistantError::network(format!("invalid URL {url}: {err}")))?;

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AssistantError::Cancelled),
            response = self.client.get(url).send() => response?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::network(format!(
                "HTTP {status} fetching {url}"
            )));
        }

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AssistantError::Cancelled),
            body = response.text() => body?,
        };
        Ok(body)
    }
}

#[async_trait]
impl ContextSource for WebContextResolver {
    async fn get_context(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<ContextResult, AssistantError> {
        if let Some(cached) = self.cache.get(url) {
            debug!(url, "context cache hit");
            return Ok(cached);
        }

        let body = self.fetch_body(url, cancel).await?;
        let text = region_text(&body, &["main", "article", "body"]);

        let result = if text.len() < self.min_length {
            warn!(
                url,
                extracted = text.len(),
                "extracted context too short, using fallback source"
            );
            let fallback_body = self.fetch_body(&self.fallback_url, cancel).await?;
            ContextResult {
                text: region_text(&fallback_body, &["body"]),
                source_url: self.fallback_url.clone(),
                used_fallback: true,
            }
        } else {
            ContextResult {
                text,
                source_url: url.to_string(),
                used_fallback: false,
            }
        };

        self.cache.insert(url, result.clone());
        Ok(result)
    }
}

/// Extract collapsed text from the first matching region. The parsed
/// document stays inside this function: it is not `Send` and must never be
/// held across an await.
fn region_text(html: &str, regions: &[&str]) -> String {
    let document = Html::parse_document(html);
    for region in regions {
        let Ok(selector) = Selector::parse(region) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = collapse_whitespace(element.text());
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_preference_is_main_then_article_then_body() {
        let html = "<html><body>outer <article>story</article> <main>core  text</main></body></html>";
        assert_eq!(region_text(html, &["main", "article", "body"]), "core text");
        assert_eq!(region_text(html, &["article", "body"]), "story");

        let plain = "<html><body>only   body   text</body></html>";
        assert_eq!(region_text(plain, &["main", "article", "body"]), "only body text");
    }

    #[test]
    fn region_text_is_empty_for_empty_document() {
        assert_eq!(region_text("", &["main", "article", "body"]), "");
    }

    #[test]
    fn cache_returns_fresh_entries_only() {
        let cache = PageCache::new(Duration::from_secs(60));
        let result = ContextResult {
            text: "hello".into(),
            source_url: "https://example.test/".into(),
            used_fallback: false,
        };
        cache.insert("https://example.test/", result.clone());
        assert_eq!(cache.get("https://example.test/"), Some(result));

        let expiring = PageCache::new(Duration::ZERO);
        let result = ContextResult {
            text: "gone".into(),
            source_url: "https://example.test/".into(),
            used_fallback: false,
        };
        expiring.insert("https://example.test/", result);
        assert_eq!(expiring.get("https://example.test/"), None);
        assert!(expiring.is_empty());
    }

    #[test]
    fn prune_drops_only_expired_entries() {
        let expiring = PageCache::new(Duration::ZERO);
        expiring.insert(
            "https://a.test/",
            ContextResult {
                text: "a".into(),
                source_url: "https://a.test/".into(),
                used_fallback: false,
            },
        );
        assert_eq!(expiring.len(), 1);
        expiring.prune();
        assert!(expiring.is_empty());
    }
}
