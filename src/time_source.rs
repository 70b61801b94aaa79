// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Current-time retrieval from public clock sites
//!
//! Lets the model answer "what time is it" questions with an
//! authoritative source instead of the host clock. Each configured site
//! has its own selector; sources are tried in order and the system clock
//! is the final fallback, so the operation never fails.

use chrono::Local;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const WEEKDAYS: &[(&str, &str)] = &[
    ("Monday", "一"),
    ("Tuesday", "二"),
    ("Wednesday", "三"),
    ("Thursday", "四"),
    ("Friday", "五"),
    ("Saturday", "六"),
    ("Sunday", "日"),
];

/// Configuration for online time retrieval
#[derive(Debug, Clone)]
pub struct TimeSourceConfig {
    /// Clock sites tried in order
    pub sources: Vec<String>,
    /// Timeout per source
    pub timeout: Duration,
}

impl Default for TimeSourceConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                "https://www.timeanddate.com/worldclock/china/beijing".to_string(),
                "https://www.worldtimeserver.com/current_time_in_CN.aspx".to_string(),
                "https://time.is/Beijing".to_string(),
            ],
            timeout: Duration::from_secs(5),
        }
    }
}

/// Current time information from an online source or the system clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeInfo {
    /// Source name ("system" for the fallback)
    pub source: String,
    /// The time text
    pub time: String,
    /// Source URL when the time came from an online source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// English weekday name when it could be extracted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
    /// Chinese weekday numeral when it could be extracted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday_cn: Option<String>,
    /// Explanation when a fallback was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Fetches the current time from public clock sites
pub struct TimeFetcher {
    client: Client,
    config: TimeSourceConfig,
}

impl TimeFetcher {
    /// Create a new time fetcher
    pub fn new(config: TimeSourceConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Retrieve the current time
    ///
    /// Tries each configured source in order; all failing, returns the
    /// system time with an explanatory note. Never fails.
    pub async fn current_time(&self) -> TimeInfo {
        for source in &self.config.sources {
            match self.fetch_source(source).await {
                Some(info) => return info,
                None => {
                    warn!("Could not read time from source: {}", source);
                }
            }
        }

        system_time_fallback()
    }

    async fn fetch_source(&self, source: &str) -> Option<TimeInfo> {
        let selector_str = clock_selector(source)?;

        debug!("Fetching time from: {}", source);
        let response = self.client.get(source).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        let html = response.text().await.ok()?;

        let document = Html::parse_document(&html);
        let selector = Selector::parse(selector_str).ok()?;
        let element = document.select(&selector).next()?;
        let raw: String = element.text().collect::<Vec<_>>().join(" ");

        // timeanddate appends widget labels after the clock text
        let time = raw
            .split("Fullscreen")
            .next()
            .unwrap_or("")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if time.is_empty() {
            return None;
        }

        let (weekday, weekday_cn) = WEEKDAYS
            .iter()
            .find(|(en, _)| time.contains(en))
            .map(|(en, cn)| (Some(en.to_string()), Some(cn.to_string())))
            .unwrap_or((None, None));

        Some(TimeInfo {
            source: domain_of(source),
            time,
            url: Some(source.to_string()),
            weekday,
            weekday_cn,
            note: None,
        })
    }
}

/// The clock-text selector for a known source, if any
fn clock_selector(source: &str) -> Option<&'static str> {
    if source.contains("timeanddate") {
        Some("#qlook")
    } else if source.contains("worldtimeserver") {
        Some("#theTime")
    } else if source.contains("time.is") {
        Some("#clock")
    } else {
        None
    }
}

fn system_time_fallback() -> TimeInfo {
    let now = Local::now();
    TimeInfo {
        source: "system".to_string(),
        time: now.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
        url: None,
        weekday: None,
        weekday_cn: None,
        note: Some(
            "Could not reach any online time source; falling back to the system clock"
                .to_string(),
        ),
    }
}

fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
