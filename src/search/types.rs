// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search scraping

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single organic result scraped from a search engine result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the search result
    pub title: String,
    /// Absolute URL of the search result
    pub link: String,
    /// Snippet/description of the search result
    pub snippet: String,
}

/// Supported search engine backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Google,
    Bing,
    Baidu,
}

impl Engine {
    /// Engine name for logging and config parsing
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
            Self::Baidu => "baidu",
        }
    }

    /// Parse an engine name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "google" => Some(Self::Google),
            "bing" => Some(Self::Bing),
            "baidu" => Some(Self::Baidu),
            _ => None,
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors internal to a single scrape attempt
///
/// These never cross the public `search` contract; exhausted retries
/// degrade to placeholder results instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// HTTP request error (connect, timeout, body read)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Engine answered with a non-success status
    #[error("engine returned HTTP {0}")]
    Status(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_serialization() {
        let result = SearchResult {
            title: "Test Title".to_string(),
            link: "https://example.org/page".to_string(),
            snippet: "Test snippet".to_string(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("Test Title"));
        assert!(json.contains("https://example.org/page"));
    }

    #[test]
    fn test_search_result_deserialization() {
        let json = r#"{
            "title": "Test",
            "link": "https://example.org",
            "snippet": "A test"
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.title, "Test");
        assert_eq!(result.link, "https://example.org");
    }

    #[test]
    fn test_engine_parse() {
        assert_eq!(Engine::parse("google"), Some(Engine::Google));
        assert_eq!(Engine::parse("BING"), Some(Engine::Bing));
        assert_eq!(Engine::parse("Baidu"), Some(Engine::Baidu));
        assert_eq!(Engine::parse("altavista"), None);
    }

    #[test]
    fn test_engine_serde_names() {
        assert_eq!(serde_json::to_string(&Engine::Google).unwrap(), "\"google\"");
        let engine: Engine = serde_json::from_str("\"baidu\"").unwrap();
        assert_eq!(engine, Engine::Baidu);
    }

    #[test]
    fn test_scrape_error_display() {
        let error = ScrapeError::Status(503);
        assert!(error.to_string().contains("503"));
    }
}
