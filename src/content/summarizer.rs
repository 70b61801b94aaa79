// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extractive summarization
//!
//! Frequency-based sentence scoring: no model involved, every output
//! sentence appears verbatim in the source text. Summaries prefer
//! medium-length sentences near the top of the document; key-point
//! selection additionally rewards importance-indicator wording.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Common English stop words excluded from frequency counting
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "can", "will",
    "just", "should", "now",
];

/// Words signalling that a sentence states a key point
const IMPORTANCE_INDICATORS: &[&str] = &[
    "importantly",
    "significantly",
    "notably",
    "key",
    "crucial",
    "essential",
    "primary",
];

/// Sentences shorter than this (in characters) are never key points
const MIN_KEY_POINT_LEN: usize = 30;

/// Ideal sentence length in words for the summary length preference
const IDEAL_SENTENCE_WORDS: f64 = 20.0;

/// Split text into sentences at `.`/`!`/`?` boundaries followed by whitespace
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |next| next.is_whitespace())
        {
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Lowercased alphanumeric tokens
fn tokenize_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

/// Word frequency over the whole text, stop words removed
fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for word in tokenize_words(text) {
        if !STOP_WORDS.contains(&word.as_str()) {
            *frequencies.entry(word).or_insert(0) += 1;
        }
    }
    frequencies
}

/// Indices of the top `count` scored sentences, re-sorted to document order
fn top_indices(mut scored: Vec<(usize, f64)>, count: usize) -> Vec<usize> {
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(count);
    let mut indices: Vec<usize> = scored.into_iter().map(|(i, _)| i).collect();
    indices.sort_unstable();
    indices
}

/// Generate an extractive summary
///
/// Texts of three sentences or fewer are returned as-is (joined, original
/// order). Longer texts are reduced to the three highest-scoring
/// sentences, re-sorted into document order, and truncated to
/// `max_length` characters at a word boundary.
pub fn summarize(text: &str, max_length: usize) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return String::new();
    }
    if sentences.len() <= 3 {
        return sentences.join(" ");
    }

    let frequencies = word_frequencies(text);
    let mut scored = Vec::with_capacity(sentences.len());

    for (i, sentence) in sentences.iter().enumerate() {
        let words = tokenize_words(sentence);
        if words.is_empty() {
            continue;
        }
        let word_count = words.len() as f64;

        // Prefer sentences that are neither very short nor very long
        let length_factor = if word_count < IDEAL_SENTENCE_WORDS {
            (word_count / IDEAL_SENTENCE_WORDS).min(1.0)
        } else {
            (2.0 * IDEAL_SENTENCE_WORDS / word_count).min(1.0)
        };

        // Earlier sentences are more likely to matter
        let position_factor = if i < 5 { 1.0 } else { 0.8 };

        let frequency_sum: usize = words
            .iter()
            .filter_map(|word| frequencies.get(word))
            .sum();

        scored.push((
            i,
            (frequency_sum as f64 / word_count) * length_factor * position_factor,
        ));
    }

    let summary = top_indices(scored, 3)
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" ");

    truncate_at_word(&summary, max_length)
}

/// Extract up to `max_points` key-point sentences
///
/// Same frequency scoring as the summary, without the length/position
/// factors, plus a fixed bonus per importance-indicator word present.
/// Returned in document order.
pub fn key_points(text: &str, max_points: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let sentences = split_sentences(text);
    if sentences.len() <= max_points {
        return sentences;
    }

    let frequencies = word_frequencies(text);
    let mut scored = Vec::new();

    for (i, sentence) in sentences.iter().enumerate() {
        if sentence.chars().count() < MIN_KEY_POINT_LEN {
            continue;
        }

        let words: Vec<String> = tokenize_words(sentence)
            .into_iter()
            .filter(|word| !STOP_WORDS.contains(&word.as_str()))
            .collect();
        if words.is_empty() {
            continue;
        }

        let indicator_bonus = IMPORTANCE_INDICATORS
            .iter()
            .filter(|indicator| words.iter().any(|word| word == *indicator))
            .count() as f64
            * 0.5;

        let frequency_sum: usize = words
            .iter()
            .filter_map(|word| frequencies.get(word))
            .sum();

        scored.push((i, frequency_sum as f64 / words.len() as f64 + indicator_bonus));
    }

    top_indices(scored, max_points)
        .into_iter()
        .map(|i| sentences[i].clone())
        .collect()
}

/// Truncate to `max_length` characters at a word boundary, appending `...`
pub fn truncate_at_word(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let head: String = text.chars().take(max_length).collect();
    match head.rfind(' ') {
        Some(position) => format!("{}...", &head[..position]),
        None => format!("{}...", head),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_TEXT: &str = "Rust is a systems programming language focused on safety and \
        performance. The compiler enforces memory safety through ownership and borrowing rules. \
        Importantly, the ownership model eliminates whole classes of bugs at compile time. Many \
        teams adopt Rust for network services because the runtime overhead is low. The package \
        ecosystem has grown steadily and covers most common service needs. Some developers find \
        the learning curve steep at first. After the initial period most report higher \
        confidence when refactoring large programs.";

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First one. Second one! Third one? Tail without end");
        assert_eq!(sentences.len(), 4);
        assert_eq!(sentences[0], "First one.");
        assert_eq!(sentences[3], "Tail without end");
    }

    #[test]
    fn test_split_sentences_ignores_inline_periods() {
        let sentences = split_sentences("Visit example.org today. Done.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("example.org"));
    }

    #[test]
    fn test_short_text_returned_verbatim() {
        let text = "One sentence here. A second sentence follows. And a third.";
        assert_eq!(summarize(text, 500), text);
    }

    #[test]
    fn test_summary_selects_three_sentences() {
        let summary = summarize(LONG_TEXT, 1000);
        let count = split_sentences(&summary).len();
        assert_eq!(count, 3);
        // Every summary sentence appears verbatim in the source
        for sentence in split_sentences(&summary) {
            assert!(LONG_TEXT.contains(&sentence));
        }
    }

    #[test]
    fn test_summary_preserves_document_order() {
        let summary = summarize(LONG_TEXT, 1000);
        let selected = split_sentences(&summary);
        let positions: Vec<usize> = selected
            .iter()
            .map(|s| LONG_TEXT.find(s.as_str()).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_summary_truncation() {
        let summary = summarize(LONG_TEXT, 80);
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= 83);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(summarize("", 100), "");
        assert!(key_points("", 5).is_empty());
    }

    #[test]
    fn test_key_points_short_text_returned_whole() {
        let text = "Only one sentence lives here.";
        let points = key_points(text, 5);
        assert_eq!(points, vec![text.to_string()]);
    }

    #[test]
    fn test_key_points_bounded_and_ordered() {
        let points = key_points(LONG_TEXT, 3);
        assert!(points.len() <= 3);
        let positions: Vec<usize> = points
            .iter()
            .map(|s| LONG_TEXT.find(s.as_str()).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_key_points_skip_tiny_sentences() {
        let text = "Tiny. Also small. This sentence is comfortably long enough to be \
            considered for key point extraction in the scoring pass. Another sentence that is \
            long enough to qualify for scoring and selection here. A third qualifying sentence \
            with plenty of characters to pass the threshold easily. One more qualifying \
            sentence to push the total count over the maximum point limit.";
        let points = key_points(text, 3);
        assert!(!points.iter().any(|p| p == "Tiny." || p == "Also small."));
    }

    #[test]
    fn test_indicator_bonus_prefers_marked_sentence() {
        // Two sentences with identical vocabulary; only one carries an
        // importance indicator
        let text = "The migration plan covers storage systems tonight. Importantly, the \
            migration plan covers storage systems tonight. Gardens bloom quietly beside the \
            northern river every damp spring morning. Distant lighthouses blink across foggy \
            harbors while sailors wait patiently. Curious foxes wander narrow alpine trails \
            hunting beetles under moonlight. Ancient libraries preserve fragile manuscripts \
            inside climate controlled vaults.";
        let points = key_points(text, 1);
        assert_eq!(points.len(), 1);
        assert!(points[0].starts_with("Importantly"));
    }

    #[test]
    fn test_truncate_at_word() {
        let text = "This is a long text that needs to be truncated at a word boundary";
        let truncated = truncate_at_word(text, 30);
        assert!(truncated.ends_with("..."));
        assert!(truncated.chars().count() <= 33);
        // No mid-word cut
        let body = truncated.trim_end_matches("...");
        assert!(text.starts_with(body));
        assert!(text.as_bytes()[body.len()] == b' ');
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_at_word("short", 100), "short");
    }
}
