//! Compiled regex patterns and CSS selectors for content extraction.
//!
//! All patterns are compiled once at first use via `LazyLock` and are
//! read-only afterwards, so extraction can run on many threads at once.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Boilerplate Detection Patterns
// =============================================================================

/// Matches class/id tokens indicating navigation elements.
///
/// `nav` only matches at a token edge so layout containers such as
/// `in-page-nav-container` stay eligible.
pub static NAVIGATION_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(^nav$|^nav[-_]|[-_]nav$|navbar|navigation|top[-_]?nav|main[-_]?menu|site[-_]?nav|\bmenu\b|site[-_]?footer|site[-_]?header|page[-_]?footer|breadcrumbs?|crumbs?)",
    )
    .expect("NAVIGATION_CLASS regex")
});

/// Matches a leading class/id token naming an advertisement.
pub static ADVERTISEMENT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ad|ads|adv|advert|advertisement|sponsor|sponsored|promo|banner)$")
        .expect("ADVERTISEMENT_CLASS regex")
});

/// Matches class/id tokens indicating boilerplate content.
pub static BOILERPLATE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(shar(?:e|ing)[-_]|social|\bcomments?\b|comment[-_]?list|disqus|related|recommend(?:ed)?|\bfooter\b|copyright|disclaimer|more[-_]?from|you[-_]?may[-_]?like|taboola|outbrain|cookie[-_]?(?:consent|notice|banner)|consent[-_]?banner|gdpr|\blogin\b|\bsign[-_]?(?:in|up)\b|\bsubscribe\b|newsletter|trending|most[-_]?read|popular[-_]?posts|top[-_]?stories|tag[-_]?cloud|skip[-_]?link|\bwidget\b|\bsidebar\b|\bpopup\b|\bmodal\b)",
    )
    .expect("BOILERPLATE_CLASS regex")
});

// =============================================================================
// Reddit Patterns
// =============================================================================

/// Captures the subreddit name from a `/r/<name>` path segment.
pub static SUBREDDIT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|/)r/([A-Za-z0-9_]+)").expect("SUBREDDIT_PATH regex")
});

/// Matches the ` : r/<name>` (new layout) or ` : <name>` (old layout)
/// suffix Reddit appends to page titles.
pub static SUBREDDIT_TITLE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+:\s+(?:r/)?\w+\s*$").expect("SUBREDDIT_TITLE_SUFFIX regex")
});

/// Matches a vote score such as `1,234`, `-3`, `1.2k` or `12 points`.
pub static SCORE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(-?[0-9][0-9,]*(?:\.[0-9]+)?)\s*([km])?\s*(?:points?|votes?|upvotes?)?\s*$")
        .expect("SCORE_TEXT regex")
});

// =============================================================================
// YouTube Patterns
// =============================================================================

/// Captures the count from a like button label such as `12K likes` or
/// `like this video along with 1,234 other people`.
pub static LIKE_COUNT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:([0-9][0-9,.]*\s?[kmb]?)\s*likes?\b|along with ([0-9][0-9,.]*\s?[kmb]?) other)")
        .expect("LIKE_COUNT_LABEL regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

/// Matches runs of spaces and tabs inside a line.
pub static INLINE_SPACES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]+").expect("INLINE_SPACES regex")
});

/// Matches three or more consecutive newlines.
pub static MULTIPLE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n{3,}").expect("MULTIPLE_NEWLINES regex")
});

// =============================================================================
// CSS Selectors
// =============================================================================

/// Elements removed before content selection in the generic extractor.
pub const NON_CONTENT_SELECTOR: &str = "script, style, noscript, template, iframe, object, embed, svg, canvas, nav, aside, footer, button, input, select, textarea, dialog, [role='navigation'], [role='banner'], [role='contentinfo'], [role='complementary'], [aria-hidden='true'], [hidden]";

/// Semantic containers tried before the density pass.
pub const SEMANTIC_CONTENT_SELECTOR: &str = "article, [role='article'], main, [role='main'], [itemprop='articleBody']";

/// Elements whose text counts as paragraph content in the density pass.
pub const PARAGRAPH_SELECTOR: &str = "p, pre, blockquote, li, td, h1, h2, h3, h4, h5, h6";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_class_matches_nav_elements() {
        assert!(NAVIGATION_CLASS.is_match("main-nav"));
        assert!(NAVIGATION_CLASS.is_match("sidebar-menu"));
        assert!(NAVIGATION_CLASS.is_match("site-footer"));
        assert!(!NAVIGATION_CLASS.is_match("article-content"));
        assert!(!NAVIGATION_CLASS.is_match("in-page-nav-container"));
    }

    #[test]
    fn subreddit_path_captures_name() {
        let caps = SUBREDDIT_PATH.captures("/r/rust/comments/abc/title/");
        assert_eq!(caps.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("rust"));
    }

    #[test]
    fn title_suffix_is_stripped() {
        let title = SUBREDDIT_TITLE_SUFFIX.replace("Why Rust? : r/rust", "");
        assert_eq!(title, "Why Rust?");
        let title = SUBREDDIT_TITLE_SUFFIX.replace("Why Rust? : rust", "");
        assert_eq!(title, "Why Rust?");
        let title = SUBREDDIT_TITLE_SUFFIX.replace("Q: what next", "");
        assert_eq!(title, "Q: what next");
    }

    #[test]
    fn score_text_accepts_common_forms() {
        for s in ["12", "1,234", "-3", "1.2k", "12 points", "1 point"] {
            assert!(SCORE_TEXT.is_match(s), "{s} should match");
        }
        assert!(!SCORE_TEXT.is_match("•"));
        assert!(!SCORE_TEXT.is_match("Vote"));
    }

    #[test]
    fn like_count_label_captures_count() {
        let count = |label: &str| {
            LIKE_COUNT_LABEL
                .captures(label)
                .and_then(|c| c.get(1).or_else(|| c.get(2)))
                .map(|m| m.as_str().trim().to_string())
        };
        assert_eq!(count("12K likes").as_deref(), Some("12K"));
        assert_eq!(count("1,234 likes").as_deref(), Some("1,234"));
        assert_eq!(count("like this video along with 5,678 other people").as_deref(), Some("5,678"));
        assert_eq!(count("I like this"), None);
    }
}
