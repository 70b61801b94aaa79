// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search result scraping
//!
//! Scrapes organic results from public search engine result pages for
//! consumption by a locally hosted LLM:
//! - Three engine backends (Google, Bing, Baidu) selected per request
//! - Rotating user agents with bounded retries
//! - Ordered candidate selector chains tolerant of markup changes
//! - Graceful degradation to synthesized placeholder results
//!
//! The scraper never fails: when every attempt comes back empty the caller
//! receives placeholder results explaining the degraded condition.

pub mod engine;
pub mod placeholder;
pub mod scraper;
pub mod types;

// Re-export commonly used types
pub use engine::EngineProfile;
pub use placeholder::{placeholder_results, SENTINEL_DOMAIN};
pub use self::scraper::{parse_results, ResultScraper, ScrapeConfig, USER_AGENTS};
pub use types::{Engine, ScrapeError, SearchResult};
