// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Synthesized placeholder results for degraded search
//!
//! When every scrape attempt fails the pipeline still needs a non-empty,
//! formattable result set, so a deterministic placeholder list is
//! substituted. Category-specific entries are added for time, weather and
//! news queries so the downstream model can explain the degraded condition
//! with something useful.
//!
//! Category detection is case-insensitive substring matching over fixed
//! bilingual vocabularies. It is a best-effort heuristic with known
//! false-positive risk; the exclusion lists guard the worst offenders
//! (e.g. "时间复杂度" is about algorithmic complexity, not clock time) but
//! are deliberately not exhaustive.

use chrono::{Datelike, Local, Weekday};

use super::types::SearchResult;

/// Domain used by all placeholder links; callers can detect degraded
/// operation by matching on it
pub const SENTINEL_DOMAIN: &str = "example.com";

const TIME_KEYWORDS: &[&str] = &[
    "时间",
    "日期",
    "几点",
    "what time",
    "current time",
    "date",
    "today",
    "now",
    "当前时间",
];

const TIME_EXCLUSIONS: &[&str] = &["时间复杂度"];

const WEATHER_KEYWORDS: &[&str] = &[
    "天气",
    "气温",
    "weather",
    "temperature",
    "forecast",
    "雨",
    "雪",
    "晴",
    "阴",
];

const LOCATION_KEYWORDS: &[&str] = &[
    "北京",
    "上海",
    "广州",
    "深圳",
    "杭州",
    "成都",
    "重庆",
    "武汉",
    "西安",
    "南京",
    "beijing",
    "shanghai",
    "guangzhou",
    "shenzhen",
];

const NEWS_KEYWORDS: &[&str] = &[
    "新闻",
    "资讯",
    "头条",
    "news",
    "headlines",
    "最新消息",
    "报道",
];

/// Generate placeholder results for a failed search
///
/// The base two entries explain that live search is unavailable; category
/// entries follow when the query matches the time/weather/news
/// vocabularies. The list is truncated to `num_results`.
pub fn placeholder_results(query: &str, num_results: usize) -> Vec<SearchResult> {
    let now = Local::now();
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let query_lower = query.to_lowercase();

    let mut results = vec![
        SearchResult {
            title: format!("Search results for \"{}\" - placeholder data", query),
            link: format!("https://{}/search-results", SENTINEL_DOMAIN),
            snippet: format!(
                "This is a synthesized search result. The search engine could not \
                 be reached, so this placeholder was generated instead. Current \
                 time: {}",
                timestamp
            ),
        },
        SearchResult {
            title: "Search temporarily unavailable".to_string(),
            link: format!("https://{}/search-unavailable", SENTINEL_DOMAIN),
            snippet: "The search engine may be blocking requests from this address, \
                      or the network connection is down. Please try again later."
                .to_string(),
        },
    ];

    if matches_category(&query_lower, TIME_KEYWORDS, TIME_EXCLUSIONS) {
        let weekday = now.weekday();
        results.push(SearchResult {
            title: "Current time information".to_string(),
            link: format!("https://{}/current-time", SENTINEL_DOMAIN),
            snippet: format!(
                "The current system time is {}, {} (星期{}). This time information \
                 was generated locally.",
                timestamp,
                english_weekday(weekday),
                chinese_weekday(weekday)
            ),
        });
    }

    if matches_category(&query_lower, WEATHER_KEYWORDS, &[]) {
        let location = LOCATION_KEYWORDS
            .iter()
            .find(|loc| query_lower.contains(*loc))
            .copied()
            .unwrap_or("unknown location");
        results.push(SearchResult {
            title: format!("{} weather information - placeholder data", location),
            link: format!("https://{}/weather-unavailable", SENTINEL_DOMAIN),
            snippet: format!(
                "Weather services could not be reached, so no live conditions for \
                 {} are available. This is a synthesized weather placeholder.",
                location
            ),
        });
    }

    if matches_category(&query_lower, NEWS_KEYWORDS, &[]) {
        results.push(SearchResult {
            title: "Latest news - placeholder data".to_string(),
            link: format!("https://{}/news", SENTINEL_DOMAIN),
            snippet: format!(
                "News services could not be reached, so no recent coverage of \
                 \"{}\" is available. This is a synthesized news placeholder.",
                query
            ),
        });
    }

    results.truncate(num_results);
    results
}

/// Substring category match with an exclusion guard
fn matches_category(query_lower: &str, keywords: &[&str], exclusions: &[&str]) -> bool {
    if exclusions.iter().any(|e| query_lower.contains(e)) {
        return false;
    }
    keywords.iter().any(|k| query_lower.contains(k))
}

fn english_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn chinese_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "一",
        Weekday::Tue => "二",
        Weekday::Wed => "三",
        Weekday::Thu => "四",
        Weekday::Fri => "五",
        Weekday::Sat => "六",
        Weekday::Sun => "日",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_placeholders_present() {
        let results = placeholder_results("anything at all", 5);
        assert!(results.len() >= 2);
        assert!(results[0].link.contains(SENTINEL_DOMAIN));
        assert!(results[1].link.contains("search-unavailable"));
    }

    #[test]
    fn test_truncated_to_requested_count() {
        let results = placeholder_results("current time and weather news", 2);
        assert_eq!(results.len(), 2);

        let results = placeholder_results("anything", 0);
        assert!(results.is_empty());
    }

    #[test]
    fn test_time_query_embeds_weekday() {
        let results = placeholder_results("what is the current time", 10);
        let entry = results
            .iter()
            .find(|r| r.link.contains("current-time"))
            .expect("time placeholder present");
        assert!(entry.snippet.contains(english_weekday(Local::now().weekday())));
    }

    #[test]
    fn test_time_exclusion_guard() {
        // "时间复杂度" contains the time keyword "时间" but is about
        // algorithmic complexity
        let results = placeholder_results("时间复杂度 分析", 10);
        assert!(!results.iter().any(|r| r.link.contains("current-time")));
    }

    #[test]
    fn test_weather_query_includes_location() {
        let results = placeholder_results("北京今天天气怎么样", 10);
        let entry = results
            .iter()
            .find(|r| r.link.contains("weather-unavailable"))
            .expect("weather placeholder present");
        assert!(entry.title.contains("北京"));
    }

    #[test]
    fn test_weather_query_without_location() {
        let results = placeholder_results("weather forecast", 10);
        let entry = results
            .iter()
            .find(|r| r.link.contains("weather-unavailable"))
            .expect("weather placeholder present");
        assert!(entry.title.contains("unknown location"));
    }

    #[test]
    fn test_news_query_quotes_original() {
        let results = placeholder_results("latest news about rust", 10);
        let entry = results
            .iter()
            .find(|r| r.link.contains("/news"))
            .expect("news placeholder present");
        assert!(entry.snippet.contains("latest news about rust"));
    }

    #[test]
    fn test_unrelated_query_gets_base_entries_only() {
        let results = placeholder_results("rust borrow checker", 10);
        assert_eq!(results.len(), 2);
    }
}
