// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-engine scraping profiles
//!
//! Each engine carries ordered candidate selector chains for the result
//! container and its title/link/snippet fields. Engines change their result
//! markup over time, so every chain is tried in order and the first selector
//! that matches wins.

use url::Url;

use super::types::Engine;

/// Scraping profile for one search engine
#[derive(Debug, Clone, Copy)]
pub struct EngineProfile {
    /// Ordered candidate selectors for one organic result container
    pub result_selectors: &'static [&'static str],
    /// Ordered candidate selectors for the result title, relative to the container
    pub title_selectors: &'static [&'static str],
    /// Ordered candidate selectors for the result link, relative to the container
    pub link_selectors: &'static [&'static str],
    /// Ordered candidate selectors for the result snippet, relative to the container
    pub snippet_selectors: &'static [&'static str],
    /// Link fragments identifying the engine's own navigation/account/support pages
    pub blocked_link_fragments: &'static [&'static str],
    /// Origin used to resolve relative result links
    pub origin: &'static str,
}

/// Google result page profile
///
/// The container list spans several generations of Google's result markup;
/// older selectors are kept because regional endpoints still serve them.
const GOOGLE: EngineProfile = EngineProfile {
    result_selectors: &[
        "div.g",
        "div.Gx5Zad",
        "div.tF2Cxc",
        "div[jscontroller]",
        "div.MjjYud",
        "div.v7W49e",
        "div.srKDX",
        "div.N54PNb",
    ],
    title_selectors: &[
        "h3",
        "h3.LC20lb",
        "div.vvjwJb",
        "div.DKV0Md",
        "h3.zBAuLc",
        "h3.DKV0Md",
    ],
    link_selectors: &[
        "a[href]",
        "div.yuRUbf > a",
        "div.Z26q7c > a",
        "div.eKjLze > div > div > a",
    ],
    snippet_selectors: &[
        "div.VwiC3b",
        "div.lEBKkf",
        "span.aCOpRe",
        "div.s3v9rd",
        "div.VwiC3b.yXK7lf",
        "span.s3v9rd",
    ],
    blocked_link_fragments: &["google.com/search", "accounts.google", "support.google"],
    origin: "https://www.google.com",
};

const BING: EngineProfile = EngineProfile {
    result_selectors: &["li.b_algo"],
    title_selectors: &["h2 a", "h2"],
    link_selectors: &["h2 a", "a[href]"],
    snippet_selectors: &["div.b_caption p", "p.b_lineclamp2", "div.b_caption"],
    blocked_link_fragments: &["bing.com/search", "bing.com/account", "go.microsoft.com"],
    origin: "https://www.bing.com",
};

const BAIDU: EngineProfile = EngineProfile {
    result_selectors: &[
        "div.result.c-container",
        "div.result-op.c-container",
        "div.c-container",
    ],
    title_selectors: &["h3.t", "h3.c-title", "h3"],
    link_selectors: &["h3.t a", "h3.c-title a", "h3 a", "a[href]"],
    snippet_selectors: &[
        "div.c-abstract",
        "div.c-span-last",
        ".content-right_1THTn",
    ],
    blocked_link_fragments: &["baidu.com/s?", "passport.baidu", "help.baidu"],
    origin: "https://www.baidu.com",
};

impl Engine {
    /// The scraping profile for this engine
    pub fn profile(&self) -> &'static EngineProfile {
        match self {
            Self::Google => &GOOGLE,
            Self::Bing => &BING,
            Self::Baidu => &BAIDU,
        }
    }

    /// Build the engine search URL for a query (percent-encoded)
    pub fn search_url(&self, query: &str, num_results: usize) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        match self {
            Self::Google => format!(
                "https://www.google.com/search?q={}&num={}&hl=zh-CN",
                encoded, num_results
            ),
            Self::Bing => format!(
                "https://www.bing.com/search?q={}&count={}",
                encoded, num_results
            ),
            Self::Baidu => format!("https://www.baidu.com/s?wd={}&rn={}", encoded, num_results),
        }
    }

    /// Resolve a raw `href` from a result page into a direct absolute URL
    ///
    /// Unwraps Google's `/url?q=` redirect wrapper and resolves relative
    /// links against the engine origin. Returns `None` for links that
    /// cannot become a usable absolute URL (e.g. `javascript:` hrefs).
    pub fn resolve_link(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        // Google wraps organic links in a redirect with the true target in
        // the `q` querystring parameter.
        let candidate = if let Some(rest) = raw.strip_prefix("/url?q=") {
            let target = rest.split('&').next().unwrap_or(rest);
            percent_decode(target)
        } else if raw.starts_with('/') {
            // Relative link, e.g. Baidu's redirect paths
            let base = Url::parse(self.profile().origin).ok()?;
            return base.join(raw).ok().map(|u| u.to_string());
        } else {
            raw.to_string()
        };

        let parsed = Url::parse(&candidate).ok()?;
        matches!(parsed.scheme(), "http" | "https").then_some(candidate)
    }
}

/// Decode percent-encoded bytes, tolerating malformed escapes
fn percent_decode(input: &str) -> String {
    let mut bytes = Vec::with_capacity(input.len());
    let mut iter = input.bytes();

    while let Some(b) = iter.next() {
        match b {
            b'%' => {
                let hi = iter.next();
                let lo = iter.next();
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        let hex = [hi, lo];
                        match u8::from_str_radix(std::str::from_utf8(&hex).unwrap_or(""), 16) {
                            Ok(byte) => bytes.push(byte),
                            Err(_) => {
                                bytes.push(b'%');
                                bytes.extend_from_slice(&hex);
                            }
                        }
                    }
                    _ => {
                        bytes.push(b'%');
                        bytes.extend(hi);
                        bytes.extend(lo);
                    }
                }
            }
            b'+' => bytes.push(b' '),
            other => bytes.push(other),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        let url = Engine::Google.search_url("rust async runtime", 5);
        assert!(url.contains("q=rust+async+runtime"));
        assert!(url.contains("num=5"));

        let url = Engine::Bing.search_url("a&b", 3);
        assert!(url.contains("q=a%26b"));
        assert!(url.contains("count=3"));

        let url = Engine::Baidu.search_url("天气", 5);
        assert!(url.starts_with("https://www.baidu.com/s?wd="));
        assert!(!url.contains("天气")); // percent-encoded
        assert!(url.contains("rn=5"));
    }

    #[test]
    fn test_resolve_direct_link() {
        let link = Engine::Bing.resolve_link("https://example.org/page").unwrap();
        assert_eq!(link, "https://example.org/page");
    }

    #[test]
    fn test_resolve_google_redirect() {
        let link = Engine::Google
            .resolve_link("/url?q=https%3A%2F%2Fexample.org%2Fdoc&sa=U&ved=abc")
            .unwrap();
        assert_eq!(link, "https://example.org/doc");
    }

    #[test]
    fn test_resolve_relative_link() {
        let link = Engine::Baidu.resolve_link("/link?url=xyz").unwrap();
        assert_eq!(link, "https://www.baidu.com/link?url=xyz");
    }

    #[test]
    fn test_resolve_rejects_unusable_links() {
        assert!(Engine::Google.resolve_link("javascript:void(0)").is_none());
        assert!(Engine::Google.resolve_link("").is_none());
        assert!(Engine::Google.resolve_link("   ").is_none());
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("https%3A%2F%2Fexample.org"), "https://example.org");
        assert_eq!(percent_decode("hello+world"), "hello world");
        // Malformed escapes pass through
        assert_eq!(percent_decode("50%"), "50%");
    }

    #[test]
    fn test_profiles_are_nonempty() {
        for engine in [Engine::Google, Engine::Bing, Engine::Baidu] {
            let profile = engine.profile();
            assert!(!profile.result_selectors.is_empty());
            assert!(!profile.title_selectors.is_empty());
            assert!(!profile.link_selectors.is_empty());
            assert!(!profile.snippet_selectors.is_empty());
        }
    }
}
