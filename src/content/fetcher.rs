// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page fetching with metadata extraction
//!
//! Fetches web page content from URLs returned by search results. Every
//! fetch is preceded by a short randomized delay to reduce rate-limit
//! pressure, and no failure crosses the public contract: errors come back
//! inside the `FetchedContent` with a descriptive message.

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use super::cleaner;
use super::extractor;
use super::summarizer;

/// Appended to content cut at `max_length`
pub const TRUNCATION_SUFFIX: &str = "...";

/// Configuration for page fetching
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Minimum pre-fetch delay in milliseconds
    pub delay_min_ms: u64,
    /// Maximum pre-fetch delay in milliseconds
    pub delay_max_ms: u64,
    /// Maximum summary length in characters
    pub summary_max_length: usize,
    /// Maximum number of key points to extract
    pub max_key_points: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            delay_min_ms: 500,
            delay_max_ms: 1500,
            summary_max_length: 200,
            max_key_points: 5,
        }
    }
}

/// Content and metadata extracted from one web page
///
/// On failure `error` is set and `content` carries a human-readable
/// failure message; the two are never both absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedContent {
    /// The fetched URL
    pub url: String,
    /// Host portion of the URL
    pub domain: String,
    /// Page title (fallback chain, never empty)
    pub title: String,
    /// Author if the page declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Publish date if the page declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    /// Cleaned main text, possibly truncated with a marker
    pub content: String,
    /// Character count of the full cleaned text before truncation
    pub content_length: usize,
    /// Extractive summary, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Key-point sentences, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    /// Failure description when the fetch did not succeed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchedContent {
    /// Build the failure value for a fetch that did not produce content
    pub fn failure(url: &str, error: &FetchError) -> Self {
        Self {
            url: url.to_string(),
            domain: domain_of(url),
            title: extractor::UNKNOWN_TITLE.to_string(),
            author: None,
            publish_date: None,
            content: format!("Failed to fetch content from {}: {}", url, error),
            content_length: 0,
            summary: None,
            key_points: None,
            error: Some(error.to_string()),
        }
    }
}

/// Fetch error types (internal; surfaced via `FetchedContent::error`)
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request error (connect, timeout, body read)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Page answered with a non-success status
    #[error("page returned HTTP {0}")]
    Status(u16),

    /// The URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Fetches pages and extracts their content
pub struct PageFetcher {
    client: Client,
    config: FetchConfig,
}

impl PageFetcher {
    /// Create a new page fetcher
    pub fn new(config: FetchConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Fetch and extract the main content of a page
    ///
    /// Never fails: any error is reported inside the returned
    /// `FetchedContent` with `content_length` zero. Content longer than
    /// `max_length` characters is truncated with a marker;
    /// `content_length` always reflects the full extracted text.
    pub async fn fetch(&self, url: &str, summarize: bool, max_length: usize) -> FetchedContent {
        // Small randomized delay to avoid hammering upstream sites
        let delay_ms = if self.config.delay_max_ms > self.config.delay_min_ms {
            rand::thread_rng().gen_range(self.config.delay_min_ms..=self.config.delay_max_ms)
        } else {
            self.config.delay_min_ms
        };
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        match self.try_fetch(url, summarize, max_length).await {
            Ok(content) => {
                info!(
                    "Fetched {} chars from: {}",
                    content.content_length, content.url
                );
                content
            }
            Err(e) => {
                warn!("Error fetching content from {}: {}", url, e);
                FetchedContent::failure(url, &e)
            }
        }
    }

    async fn try_fetch(
        &self,
        url: &str,
        summarize: bool,
        max_length: usize,
    ) -> Result<FetchedContent, FetchError> {
        let parsed = Url::parse(url)?;
        let domain = parsed.host_str().unwrap_or_default().to_string();

        debug!("Fetching content from: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let header_charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_param);
        let bytes = response.bytes().await?;
        let html = decode_html(&bytes, header_charset.as_deref());

        let document = Html::parse_document(&html);
        let title = extractor::extract_title(&document);
        let author = extractor::extract_author(&document);
        let publish_date = extractor::extract_publish_date(&document);

        let text = cleaner::clean(&extractor::extract_main_text(&document));
        let content_length = text.chars().count();

        let content = if content_length > max_length {
            let head: String = text.chars().take(max_length).collect();
            format!("{}{}", head, TRUNCATION_SUFFIX)
        } else {
            text.clone()
        };

        let (summary, key_points) = if summarize && !text.is_empty() {
            (
                Some(summarizer::summarize(&text, self.config.summary_max_length)),
                Some(summarizer::key_points(&text, self.config.max_key_points)),
            )
        } else {
            (None, None)
        };

        Ok(FetchedContent {
            url: url.to_string(),
            domain,
            title,
            author,
            publish_date,
            content,
            content_length,
            summary,
            key_points,
            error: None,
        })
    }
}

/// Charset parameter of a Content-Type header value, if present
fn charset_param(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("charset="))
        .map(|value| value.trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|value| !value.is_empty())
}

/// Decode a response body with best-effort charset handling
///
/// Header charset wins; otherwise a meta-tag charset sniffed from the
/// document head; otherwise lossy UTF-8. Decoding anomalies are never
/// fatal.
fn decode_html(bytes: &[u8], header_charset: Option<&str>) -> String {
    let label = header_charset
        .map(str::to_string)
        .or_else(|| sniff_meta_charset(bytes));

    if let Some(label) = label {
        if let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes()) {
            let (text, _, _) = encoding.decode(bytes);
            return text.into_owned();
        }
    }

    String::from_utf8_lossy(bytes).into_owned()
}

/// Sniff a `charset=` declaration from the first 2 KiB of the document
fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(2048)]).to_lowercase();
    let position = head.find("charset=")?;
    let value: String = head[position + "charset=".len()..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    (!value.is_empty()).then_some(value)
}

fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_default()
}
