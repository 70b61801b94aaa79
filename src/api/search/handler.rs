// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API endpoint handler

use axum::{extract::State, http::StatusCode, Json};
use chrono::Local;
use tracing::{debug, info, warn};

use super::request::SearchApiRequest;
use super::response::SearchApiResponse;
use crate::api::http_server::AppState;
use crate::content::FetchedContent;
use crate::search::{SearchResult, SENTINEL_DOMAIN};

/// POST /search - scrape results and build a model prompt
///
/// # Request
/// - `query`: search query string (required, max 500 chars)
/// - `num_results`: number of results (1-20, service default when omitted)
/// - `fetch_content`: fetch page content for each result (default off)
/// - `engine`: `google` | `bing` | `baidu` (service default when omitted)
///
/// # Response
/// - `query`: original query
/// - `search_results`: scraped (or placeholder) results
/// - `detailed_content`: fetched page content, in result order
/// - `formatted_prompt`: assembled prompt for the caller's model
///
/// # Errors
/// - 400 Bad Request: invalid query or parameters
///
/// Scraping and fetching failures never surface as HTTP errors; they
/// degrade to placeholder results and error-carrying content entries.
pub async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchApiRequest>,
) -> Result<Json<SearchApiResponse>, (StatusCode, String)> {
    debug!("Search request: {:?}", request.query);

    if let Err(e) = request.validate() {
        warn!("Search validation failed: {}", e);
        return Err((StatusCode::BAD_REQUEST, e));
    }

    let engine = request.engine.unwrap_or(state.config.default_engine);
    let num_results = request
        .num_results
        .unwrap_or(state.config.default_num_results);
    let fetch_content = request
        .fetch_content
        .unwrap_or(state.config.default_fetch_content);

    let results = state
        .scraper
        .search(&request.query, engine, num_results)
        .await;

    // Fetch page content sequentially; each fetch carries its own delay
    let mut detailed_content = Vec::new();
    if fetch_content {
        for result in &results {
            if result.link.contains(SENTINEL_DOMAIN) {
                detailed_content.push(synthesized_content(result, &request.query));
            } else {
                detailed_content.push(
                    state
                        .fetcher
                        .fetch(&result.link, false, state.config.max_content_length)
                        .await,
                );
            }
        }
    }

    let pairs: Vec<(String, String)> = detailed_content
        .iter()
        .map(|content| (content.url.clone(), content.content.clone()))
        .collect();
    let formatted_prompt = state.formatter.create_prompt(
        &request.query,
        &results,
        (!pairs.is_empty()).then_some(pairs.as_slice()),
        None,
    );

    info!(
        "Search complete: {} results from {} for '{}' ({} pages fetched)",
        results.len(),
        engine,
        request.query,
        detailed_content.len()
    );

    Ok(Json(SearchApiResponse {
        query: request.query,
        search_results: results,
        detailed_content,
        formatted_prompt,
    }))
}

/// Detail text for placeholder results; their sentinel links are never
/// fetched over the network
fn synthesized_content(result: &SearchResult, query: &str) -> FetchedContent {
    let content = if result.link.contains("search-results") {
        format!("This is a synthesized result page for the query '{}'.", query)
    } else if result.link.contains("weather") {
        format!(
            "Synthesized weather information: no live conditions are available for '{}'.",
            query
        )
    } else if result.link.contains("time") {
        format!(
            "The current time is {}.",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )
    } else {
        format!("This is a synthesized content page. Query: {}", query)
    };

    FetchedContent {
        url: result.link.clone(),
        domain: SENTINEL_DOMAIN.to_string(),
        title: result.title.clone(),
        author: None,
        publish_date: None,
        content_length: content.chars().count(),
        content,
        summary: None,
        key_points: None,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::placeholder_results;

    #[test]
    fn test_synthesized_content_for_time_placeholder() {
        let results = placeholder_results("current time please", 10);
        let time_entry = results
            .iter()
            .find(|r| r.link.contains("current-time"))
            .unwrap();

        let content = synthesized_content(time_entry, "current time please");
        assert!(content.content.contains("current time is"));
        assert!(content.error.is_none());
        assert_eq!(content.domain, SENTINEL_DOMAIN);
        assert_eq!(content.content_length, content.content.chars().count());
    }

    #[test]
    fn test_synthesized_content_for_base_placeholder() {
        let results = placeholder_results("anything", 10);
        let content = synthesized_content(&results[0], "anything");
        assert!(content.content.contains("anything"));
        assert_eq!(content.title, results[0].title);
    }
}
