// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP API layer
//!
//! Thin request/response mapping over the search pipeline. All the logic
//! lives in the `search`, `content`, `prompt` and `time_source` modules;
//! handlers validate input, call the pipeline, and shape the response.

pub mod http_server;
pub mod search;

pub use http_server::{start_server, AppState};
pub use search::{SearchApiRequest, SearchApiResponse};
