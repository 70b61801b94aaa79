// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML content and metadata extraction
//!
//! Locates the main content region of a page through an ordered selector
//! chain, skipping script/style/navigation/ad noise, and extracts title,
//! author and publish date through their own fallback chains.

use scraper::{ElementRef, Html, Selector};

/// Elements never treated as content
const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "svg", "noscript", "iframe", "nav", "footer", "header", "aside",
];

/// Class names marking ad/cookie/navigation blocks, matched per class token
const EXCLUDED_CLASSES: &[&str] = &[
    "ad", "ads", "advert", "cookie", "sidebar", "comments", "related",
];

/// Ordered candidates for the main content region
const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    ".post-content",
    ".article-content",
    ".entry-content",
    "#content",
    ".content",
];

/// A main-content candidate must exceed this many characters of text to win
const MIN_MAIN_CONTENT_LEN: usize = 200;

/// Title returned when every extraction strategy fails
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Extract the main text of a document
///
/// Tries each main-content selector in order, preferring the first whose
/// visible text exceeds the minimum length; falls back to `<body>`, then to
/// the whole document.
pub fn extract_main_text(document: &Html) -> String {
    for selector_str in MAIN_CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = visible_text(element);
                if text.chars().count() > MIN_MAIN_CONTENT_LEN {
                    return text;
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("body") {
        if let Some(body) = document.select(&selector).next() {
            return visible_text(body);
        }
    }

    visible_text(document.root_element())
}

/// Visible text of an element, skipping excluded descendants,
/// whitespace-normalized
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !is_excluded(&child_element) {
                collect_text(child_element, out);
            }
        }
    }
}

fn is_excluded(element: &ElementRef<'_>) -> bool {
    let name = element.value().name();
    if EXCLUDED_TAGS.contains(&name) {
        return true;
    }

    match element.value().attr("class") {
        Some(class) => class
            .split_whitespace()
            .any(|token| EXCLUDED_CLASSES.contains(&token.to_lowercase().as_str())),
        None => false,
    }
}

/// Extract the page title
///
/// Chain: `og:title` meta → `twitter:title` meta → `<title>` → first
/// `<h1>` → fixed fallback.
pub fn extract_title(document: &Html) -> String {
    if let Some(title) = meta_content(document, "meta[property=\"og:title\"]") {
        return title;
    }
    if let Some(title) = meta_content(document, "meta[name=\"twitter:title\"]") {
        return title;
    }

    if let Ok(selector) = Selector::parse("title") {
        if let Some(element) = document.select(&selector).next() {
            let title = element.text().collect::<String>().trim().to_string();
            if !title.is_empty() {
                return title;
            }
        }
    }

    if let Ok(selector) = Selector::parse("h1") {
        if let Some(element) = document.select(&selector).next() {
            let title = visible_text(element);
            if !title.is_empty() {
                return title;
            }
        }
    }

    UNKNOWN_TITLE.to_string()
}

/// Extract the author, if any
///
/// Chain: meta tags whose `property`/`name` mentions author → common
/// byline elements. Long byline text is rejected; it is usually a bio
/// blurb rather than a name.
pub fn extract_author(document: &Html) -> Option<String> {
    if let Ok(selector) = Selector::parse("meta") {
        for element in document.select(&selector) {
            let attrs = element.value();
            let named_author = attrs
                .attr("property")
                .is_some_and(|p| p.to_lowercase().contains("author"))
                || attrs
                    .attr("name")
                    .is_some_and(|n| n.to_lowercase().contains("author"));
            if named_author {
                if let Some(content) = attrs.attr("content") {
                    let content = content.trim();
                    if !content.is_empty() {
                        return Some(content.to_string());
                    }
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse(".author, .byline, .meta-author") {
        for element in document.select(&selector) {
            let text = visible_text(element);
            if !text.is_empty() && text.chars().count() < 100 {
                return Some(text);
            }
        }
    }

    None
}

/// Extract the publish date, if any
///
/// Chain: published-time meta tags → `<time datetime>`.
pub fn extract_publish_date(document: &Html) -> Option<String> {
    if let Ok(selector) = Selector::parse("meta") {
        for element in document.select(&selector) {
            let attrs = element.value();
            let property = attrs.attr("property").unwrap_or("").to_lowercase();
            let name = attrs.attr("name").unwrap_or("").to_lowercase();
            if property.contains("published_time")
                || name.contains("publication_date")
                || name.contains("publish-date")
            {
                if let Some(content) = attrs.attr("content") {
                    let content = content.trim();
                    if !content.is_empty() {
                        return Some(content.to_string());
                    }
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("time") {
        for element in document.select(&selector) {
            if let Some(datetime) = element.value().attr("datetime") {
                return Some(datetime.to_string());
            }
        }
    }

    None
}

fn meta_content(document: &Html, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}
