// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt assembly for downstream model consumption
//!
//! Formats a query, its search results, and any fetched page content into
//! one structured text block a locally hosted model can answer from.
//! Stateless: the prompt is rebuilt on every call, and apart from the
//! embedded timestamp line the output is deterministic for identical
//! inputs.

use chrono::Local;

use crate::content::cleaner;
use crate::search::SearchResult;

/// Marker emitted when the result list is empty
pub const NO_RESULTS_MARKER: &str = "*No search results found*";

/// Marker appended to detailed content cut at the per-source limit
pub const CONTENT_TRUNCATION_MARKER: &str = "[Content truncated...]";

/// Column width for wrapped detailed-content blocks
const WRAP_WIDTH: usize = 100;

const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI assistant with access to web search results. \
    You specialize in providing accurate information based on recent web content. When \
    responding, always cite your sources by referring to the search result numbers. If the \
    search results contain contradictory information, acknowledge this and explain why. If the \
    search results don't provide sufficient information to fully answer the query, be \
    transparent about these limitations.";

/// Formats search results into prompts
#[derive(Debug, Clone)]
pub struct PromptFormatter {
    /// Maximum characters of detailed content included per source
    pub max_content_per_source: usize,
}

impl Default for PromptFormatter {
    fn default() -> Self {
        Self {
            max_content_per_source: 1500,
        }
    }
}

impl PromptFormatter {
    /// Format search results into a structured block
    ///
    /// `detailed_content` pairs each fetched URL with its extracted text,
    /// in result order; titles are resolved by matching the URL back to
    /// its search result.
    pub fn format_search_results(
        &self,
        query: &str,
        results: &[SearchResult],
        detailed_content: Option<&[(String, String)]>,
    ) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

        let mut response = format!("# Search Results for: \"{}\"\n", query);
        response.push_str(&format!("*Search performed at: {}*\n\n", timestamp));

        response.push_str("## Search Result Summaries\n\n");
        if results.is_empty() {
            response.push_str(NO_RESULTS_MARKER);
            response.push_str("\n\n");
        } else {
            for (i, result) in results.iter().enumerate() {
                response.push_str(&format!("### {}. {}\n", i + 1, result.title));
                response.push_str(&format!("**Source**: [{}]({})\n", result.link, result.link));
                response.push_str(&format!("**Summary**: {}\n\n", result.snippet));
            }
        }

        if let Some(detailed) = detailed_content.filter(|d| !d.is_empty()) {
            response.push_str("## Detailed Content\n\n");
            for (url, content) in detailed {
                let title = results
                    .iter()
                    .find(|result| result.link == *url)
                    .map(|result| result.title.as_str())
                    .unwrap_or("Content");

                let formatted = self.format_content_extract(&cleaner::clean(content));

                response.push_str(&format!("### {}\n", title));
                response.push_str(&format!("**Source**: [{}]({})\n", url, url));
                response.push_str(&format!("**Content**:\n```\n{}\n```\n\n", formatted));
            }
        }

        response.push_str("## Instructions for LLM\n\n");
        response.push_str(
            "Based on the search results above, please provide a comprehensive answer to the \
             query. Include relevant information from the search results and cite sources \
             appropriately using the source numbers. If the search results don't contain \
             sufficient information to answer the query, please acknowledge the limitations \
             and provide the best possible answer based on available information.",
        );

        response
    }

    /// Build a full model prompt around the formatted results
    ///
    /// Uses the default system-style preamble unless the caller supplies
    /// its own.
    pub fn create_prompt(
        &self,
        user_query: &str,
        results: &[SearchResult],
        detailed_content: Option<&[(String, String)]>,
        system_prompt: Option<&str>,
    ) -> String {
        let formatted_results = self.format_search_results(user_query, results, detailed_content);
        let system_prompt = system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT);

        format!(
            "{}\n\nThe user asked: \"{}\"\n\nI've searched the web and found the following \
             information to help answer this question:\n\n{}\n\nBased on these search results, \
             provide a comprehensive, accurate, and helpful response to the user's question. \
             Cite specific sources by their numbers when drawing information from them. Format \
             your response in a clear, structured way with appropriate headings and lists \
             where helpful.",
            system_prompt, user_query, formatted_results
        )
    }

    /// Truncate a content extract at a sentence boundary and wrap it
    fn format_content_extract(&self, content: &str) -> String {
        if content.is_empty() {
            return "No content available".to_string();
        }

        let limit = self.max_content_per_source;
        if content.chars().count() <= limit {
            return wrap_text(content, WRAP_WIDTH);
        }

        let head: String = content.chars().take(limit).collect();
        // Prefer ending at a sentence boundary, but only when the boundary
        // is not too far back
        let truncated = match head.rfind('.') {
            Some(position) if position + 1 >= head.len() * 4 / 5 => &head[..=position],
            _ => head.as_str(),
        };

        format!(
            "{}\n{}",
            wrap_text(truncated, WRAP_WIDTH),
            CONTENT_TRUNCATION_MARKER
        )
    }
}

/// Greedy word wrap at `width` columns; long words are not broken
fn wrap_text(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
