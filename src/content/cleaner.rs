// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text cleaning for extracted page content
//!
//! Pure, idempotent normalization: boilerplate phrase removal, email
//! redaction, whitespace collapsing.

use regex::Regex;
use std::sync::OnceLock;

/// Fixed boilerplate phrases that survive HTML extraction on most sites
const BOILERPLATE_PATTERNS: &[&str] = &[
    r"Cookie Policy",
    r"Privacy Policy",
    r"Terms of Service",
    r"Accept Cookies",
    r"\d+ comments",
    r"Share on (Facebook|Twitter|LinkedIn)",
    r"Click here to subscribe",
    r"Sign up for our newsletter",
    r"Copyright \d{4}",
    r"All rights reserved",
    r"Please enable JavaScript",
];

const EMAIL_PATTERN: &str = r"[\w.+-]+@[\w-]+\.[\w.-]+";

/// Replacement token for redacted email addresses
pub const EMAIL_PLACEHOLDER: &str = "[EMAIL]";

fn boilerplate_regexes() -> &'static Vec<Regex> {
    static REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        BOILERPLATE_PATTERNS
            .iter()
            .map(|pattern| {
                Regex::new(&format!("(?i){}", pattern)).expect("valid boilerplate pattern")
            })
            .collect()
    })
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid email pattern"))
}

/// Clean extracted text
///
/// Removes boilerplate phrases, redacts email addresses, then collapses
/// whitespace runs to single spaces and trims. Idempotent: cleaning
/// already-clean text is a no-op.
pub fn clean(text: &str) -> String {
    let mut cleaned = text.to_string();

    for regex in boilerplate_regexes() {
        cleaned = regex.replace_all(&cleaned, "").into_owned();
    }

    cleaned = email_regex()
        .replace_all(&cleaned, EMAIL_PLACEHOLDER)
        .into_owned();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean("  Hello   world  \n\n  test  "), "Hello world test");
    }

    #[test]
    fn test_removes_boilerplate() {
        let text = "Real content here. Cookie Policy Privacy Policy More content.";
        let cleaned = clean(text);
        assert!(!cleaned.contains("Cookie Policy"));
        assert!(!cleaned.contains("Privacy Policy"));
        assert!(cleaned.contains("Real content here."));
        assert!(cleaned.contains("More content."));
    }

    #[test]
    fn test_boilerplate_case_insensitive() {
        let cleaned = clean("text COOKIE POLICY text");
        assert!(!cleaned.to_lowercase().contains("cookie policy"));
    }

    #[test]
    fn test_removes_comment_counters() {
        let cleaned = clean("An article body 42 comments trailing text");
        assert!(!cleaned.contains("42 comments"));
        assert!(cleaned.contains("trailing text"));
    }

    #[test]
    fn test_redacts_emails() {
        let cleaned = clean("Contact us at editor@news-site.com for tips.");
        assert!(!cleaned.contains("editor@news-site.com"));
        assert!(cleaned.contains(EMAIL_PLACEHOLDER));
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "  Hello   world  ",
            "Contact editor@example.org Cookie Policy now 5 comments",
            "Share on Facebook and Sign up for our newsletter today",
            "Plain sentence with nothing to remove.",
            "",
        ];
        for sample in samples {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "clean not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
    }
}
