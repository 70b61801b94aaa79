// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API response types

use serde::{Deserialize, Serialize};

use crate::content::FetchedContent;
use crate::search::SearchResult;

/// Response body for POST /search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchApiResponse {
    /// The original search query
    pub query: String,
    /// Scraped (or placeholder) search results
    pub search_results: Vec<SearchResult>,
    /// Fetched page content, in result order; empty when fetching was off
    pub detailed_content: Vec<FetchedContent>,
    /// The assembled prompt for the caller's model invocation
    pub formatted_prompt: String,
}
