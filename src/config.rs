// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! All environment reads happen here, at the HTTP layer's edge. The core
//! pipeline components take explicit config value objects
//! (`ScrapeConfig`, `FetchConfig`, `TimeSourceConfig`) and never touch the
//! environment themselves.

use std::env;

use crate::content::FetchConfig;
use crate::search::{Engine, ScrapeConfig};
use crate::time_source::TimeSourceConfig;

/// Service-level configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API bind port
    pub port: u16,
    /// Engine used when a request does not name one
    pub default_engine: Engine,
    /// Result count used when a request does not name one
    pub default_num_results: usize,
    /// Whether page content is fetched when a request does not say
    pub default_fetch_content: bool,
    /// Maximum characters of fetched content per page
    pub max_content_length: usize,
    /// Result scraping settings
    pub scrape: ScrapeConfig,
    /// Page fetching settings
    pub fetch: FetchConfig,
    /// Online time source settings
    pub time_sources: TimeSourceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default_engine = match env::var("SEARCH_ENGINE") {
            Ok(name) => Engine::parse(&name).unwrap_or_else(|| {
                tracing::warn!("Unsupported search engine '{}', using google", name);
                Engine::Google
            }),
            Err(_) => Engine::Google,
        };

        Self {
            port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5005),
            default_engine,
            default_num_results: env::var("DEFAULT_NUM_RESULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            default_fetch_content: env::var("DEFAULT_FETCH_CONTENT")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
            max_content_length: env::var("MAX_CONTENT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            scrape: ScrapeConfig::default(),
            fetch: FetchConfig::default(),
            time_sources: TimeSourceConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_num_results == 0 {
            return Err("default_num_results must be at least 1".to_string());
        }
        if self.max_content_length < 100 {
            return Err("max_content_length must be at least 100".to_string());
        }
        if self.scrape.max_attempts == 0 {
            return Err("scrape max_attempts must be at least 1".to_string());
        }
        if self.scrape.user_agents.is_empty() {
            return Err("at least one user agent is required".to_string());
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 5005,
            default_engine: Engine::Google,
            default_num_results: 5,
            default_fetch_content: false,
            max_content_length: 1000,
            scrape: ScrapeConfig::default(),
            fetch: FetchConfig::default(),
            time_sources: TimeSourceConfig::default(),
        }
    }
}
