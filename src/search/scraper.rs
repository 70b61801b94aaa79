// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Result page scraping with retries and selector fallback
//!
//! Issues the search request with rotating user agents, parses the result
//! page through each engine's candidate selector chains, and falls back to
//! synthesized placeholder results when every attempt comes back empty.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::engine::EngineProfile;
use super::placeholder::placeholder_results;
use super::types::{Engine, ScrapeError, SearchResult};

/// Rotated across retry attempts; some engines throttle repeated agents
pub const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0",
];

/// Snippet text used when no snippet selector matches a result container
const SNIPPET_UNAVAILABLE: &str = "No snippet available";

/// Configuration for result scraping
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// User agents rotated across attempts
    pub user_agents: Vec<String>,
    /// Timeout applied identically to every attempt
    pub timeout: Duration,
    /// Maximum number of attempts per search (fixed retries, not backoff)
    pub max_attempts: usize,
    /// Fixed pause between attempts
    pub retry_delay: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agents: USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Scrapes organic results from search engine result pages
pub struct ResultScraper {
    client: Client,
    config: ScrapeConfig,
}

impl ResultScraper {
    /// Create a new scraper with browser-like default headers
    pub fn new(config: ScrapeConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Perform a web search
    ///
    /// Never fails: after exhausting retries with zero usable results the
    /// returned list is synthesized placeholder data, so downstream prompt
    /// formatting always has input. The list never exceeds `num_results`.
    pub async fn search(
        &self,
        query: &str,
        engine: Engine,
        num_results: usize,
    ) -> Vec<SearchResult> {
        if num_results == 0 {
            return Vec::new();
        }

        let url = engine.search_url(query, num_results);
        let agents = &self.config.user_agents;

        for attempt in 0..self.config.max_attempts {
            let user_agent = &agents[attempt % agents.len()];
            debug!(
                "Search attempt {}/{} via {}: {}",
                attempt + 1,
                self.config.max_attempts,
                engine,
                url
            );

            match self.attempt(&url, user_agent, engine, num_results).await {
                Ok(results) if !results.is_empty() => {
                    info!(
                        "Found {} results from {} for query: {}",
                        results.len(),
                        engine,
                        query
                    );
                    return results;
                }
                Ok(_) => {
                    warn!("No results parsed from {} response, retrying", engine);
                }
                Err(e) => {
                    warn!(
                        "Search attempt {}/{} on {} failed: {}",
                        attempt + 1,
                        self.config.max_attempts,
                        engine,
                        e
                    );
                }
            }

            if attempt + 1 < self.config.max_attempts {
                tokio::time::sleep(self.config.retry_delay).await;
            }
        }

        warn!(
            "All {} attempts failed, synthesizing placeholder results for: {}",
            engine, query
        );
        placeholder_results(query, num_results)
    }

    /// One request/parse attempt
    async fn attempt(
        &self,
        url: &str,
        user_agent: &str,
        engine: Engine,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, ScrapeError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        Ok(parse_results(&html, engine, num_results))
    }
}

/// Parse a result page into search results
///
/// Container selectors are evaluated as an ordered strategy list: the first
/// selector whose containers yield at least one usable result wins.
/// Malformed containers are skipped without aborting the page.
pub fn parse_results(html: &str, engine: Engine, num_results: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let profile = engine.profile();

    for container_selector in profile.result_selectors {
        let Ok(selector) = Selector::parse(container_selector) else {
            continue;
        };

        let mut results = Vec::new();
        for container in document.select(&selector) {
            if results.len() >= num_results {
                break;
            }

            let Some(result) = extract_result(&container, profile, engine) else {
                continue;
            };

            // Skip the engine's own navigation/account/support pages
            if profile
                .blocked_link_fragments
                .iter()
                .any(|fragment| result.link.contains(fragment))
            {
                continue;
            }

            results.push(result);
        }

        if !results.is_empty() {
            debug!(
                "Selector '{}' matched {} results",
                container_selector,
                results.len()
            );
            results.truncate(num_results);
            return results;
        }
    }

    Vec::new()
}

/// Extract one result from a container element
///
/// Title and link are required; a container missing either is dropped.
fn extract_result(
    container: &ElementRef<'_>,
    profile: &EngineProfile,
    engine: Engine,
) -> Option<SearchResult> {
    let title_element = first_match(container, profile.title_selectors)?;
    let title = element_text(&title_element);
    if title.is_empty() {
        return None;
    }

    let raw_link = profile.link_selectors.iter().find_map(|selector_str| {
        let selector = Selector::parse(selector_str).ok()?;
        container
            .select(&selector)
            .find_map(|el| el.value().attr("href"))
    })?;
    let link = engine.resolve_link(raw_link)?;

    let snippet = first_match(container, profile.snippet_selectors)
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
        .or_else(|| fallback_snippet(container, &title))
        .unwrap_or_else(|| SNIPPET_UNAVAILABLE.to_string());

    Some(SearchResult {
        title,
        link,
        snippet,
    })
}

/// First element matched by an ordered selector chain
fn first_match<'a>(
    container: &ElementRef<'a>,
    selectors: &[&str],
) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|selector_str| {
        let selector = Selector::parse(selector_str).ok()?;
        container.select(&selector).next()
    })
}

/// Whitespace-normalized text content of an element
fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Last-resort snippet: the first substantial text chunk in the container
/// that is not the title
fn fallback_snippet(container: &ElementRef<'_>, title: &str) -> Option<String> {
    container
        .text()
        .map(str::trim)
        .filter(|chunk| chunk.chars().count() > 20 && !title.contains(chunk))
        .map(|chunk| chunk.split_whitespace().collect::<Vec<_>>().join(" "))
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BING_RESULT_PAGE: &str = r#"
        <html><body>
        <ol id="b_results">
            <li class="b_algo">
                <h2><a href="https://example.org/rust">Rust Programming Language</a></h2>
                <div class="b_caption"><p>A language empowering everyone to build reliable software.</p></div>
            </li>
            <li class="b_algo">
                <h2><a href="https://example.org/tokio">Tokio Runtime</a></h2>
                <div class="b_caption"><p>An asynchronous runtime for the Rust programming language.</p></div>
            </li>
        </ol>
        </body></html>
    "#;

    const BAIDU_RESULT_PAGE: &str = r#"
        <html><body>
        <div class="result c-container">
            <h3 class="t"><a href="/link?url=abc123">某个标题</a></h3>
            <div class="c-abstract">这是一个足够长的百度搜索结果摘要，用于测试解析。</div>
        </div>
        </body></html>
    "#;

    const GOOGLE_REDIRECT_PAGE: &str = r#"
        <html><body>
        <div class="g">
            <h3>Example Domain</h3>
            <a href="/url?q=https%3A%2F%2Fexample.org%2F&sa=U">link</a>
            <div class="VwiC3b">Example snippet text for the result.</div>
        </div>
        <div class="g">
            <h3>Google Support</h3>
            <a href="https://support.google.com/websearch">link</a>
            <div class="VwiC3b">Internal page that must be filtered.</div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_bing_results() {
        let results = parse_results(BING_RESULT_PAGE, Engine::Bing, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].link, "https://example.org/rust");
        assert!(results[0].snippet.contains("reliable software"));
    }

    #[test]
    fn test_parse_respects_num_results() {
        let results = parse_results(BING_RESULT_PAGE, Engine::Bing, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_parse_baidu_resolves_relative_link() {
        let results = parse_results(BAIDU_RESULT_PAGE, Engine::Baidu, 5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].link, "https://www.baidu.com/link?url=abc123");
        assert!(results[0].snippet.contains("摘要"));
    }

    #[test]
    fn test_parse_google_unwraps_redirect_and_filters_own_domain() {
        let results = parse_results(GOOGLE_REDIRECT_PAGE, Engine::Google, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].link, "https://example.org/");
        assert!(!results
            .iter()
            .any(|r| r.link.contains("support.google")));
    }

    #[test]
    fn test_parse_empty_page() {
        let results = parse_results("<html><body></body></html>", Engine::Google, 10);
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_container_without_link_is_skipped() {
        let html = r#"
            <html><body>
            <li class="b_algo"><h2>No link here</h2></li>
            </body></html>
        "#;
        let results = parse_results(html, Engine::Bing, 10);
        assert!(results.is_empty());
    }

    #[test]
    fn test_scraper_default_config() {
        let config = ScrapeConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.user_agents.len(), 4);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_search_zero_results_requested() {
        let scraper = ResultScraper::new(ScrapeConfig::default());
        let results = scraper.search("anything", Engine::Bing, 0).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_degrades_to_placeholders() {
        // An unroutable engine endpoint cannot be faked here, but a config
        // with an immediate timeout forces every attempt to fail.
        let config = ScrapeConfig {
            timeout: Duration::from_millis(1),
            retry_delay: Duration::from_millis(1),
            ..ScrapeConfig::default()
        };
        let scraper = ResultScraper::new(config);
        let results = scraper.search("rust language", Engine::Google, 5).await;
        assert!(!results.is_empty());
        assert!(results.len() <= 5);
        assert!(results[0].link.contains("example.com"));
    }
}
