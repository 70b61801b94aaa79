// Version information for the LLM Search Node

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-web-search-2025-08-05";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Build date
pub const BUILD_DATE: &str = "2025-08-05";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "web-search",
    "google-scraping",
    "bing-scraping",
    "baidu-scraping",
    "content-fetching",
    "extractive-summaries",
    "prompt-formatting",
    "online-time-sources",
    "placeholder-degradation",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("LLM Search Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(FEATURES.contains(&"web-search"));
        assert!(FEATURES.contains(&"content-fetching"));
        assert!(FEATURES.contains(&"placeholder-degradation"));
    }

    #[test]
    fn test_version_string() {
        let version = get_version_string();
        assert!(version.contains(VERSION_NUMBER));
        assert!(version.contains(BUILD_DATE));
    }
}
