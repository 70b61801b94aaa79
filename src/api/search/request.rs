// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API request types

use serde::{Deserialize, Serialize};

use crate::search::Engine;

/// Request body for POST /search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchApiRequest {
    /// Search query string (required, max 500 chars)
    pub query: String,

    /// Number of results to return (1-20, service default when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_results: Option<usize>,

    /// Whether to fetch page content for each result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_content: Option<bool>,

    /// Search engine to use (service default when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<Engine>,
}

impl SearchApiRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("Missing required parameter: query".to_string());
        }
        if self.query.len() > 500 {
            return Err("Query too long (max 500 characters)".to_string());
        }
        if let Some(num_results) = self.num_results {
            if num_results < 1 {
                return Err("num_results must be at least 1".to_string());
            }
            if num_results > 20 {
                return Err("num_results cannot exceed 20".to_string());
            }
        }
        Ok(())
    }
}
