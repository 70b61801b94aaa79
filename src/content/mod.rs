// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page content fetching and extraction
//!
//! Fetches web pages linked from search results and reduces them to clean
//! text for prompt assembly:
//! - Charset-aware body decoding
//! - Main-content location via an ordered selector chain
//! - Metadata extraction (title, author, publish date)
//! - Boilerplate cleaning and length truncation
//! - Optional extractive summaries and key points

pub mod cleaner;
pub mod extractor;
pub mod fetcher;
pub mod summarizer;

pub use cleaner::clean;
pub use fetcher::{FetchConfig, FetchError, FetchedContent, PageFetcher, TRUNCATION_SUFFIX};
pub use summarizer::{key_points, summarize};
