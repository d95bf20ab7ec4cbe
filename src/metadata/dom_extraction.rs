//! DOM-based Metadata Extraction
//!
//! Fallback strategies that search the document body when meta tags and
//! JSON-LD left a field empty. Each field has an ordered list of
//! [`Strategy`] functions; the first that yields a value wins.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use super::meta_tags::{normalize_date, normalize_language, validate_metadata_name};
use crate::dom;
use crate::selector::{Page, Strategy};

/// Regex pattern for e-mail addresses inside bylines
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("EMAIL_PATTERN regex"));

/// Regex pattern for Twitter handles inside bylines
static TWITTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("TWITTER_PATTERN regex"));

/// Regex pattern for leading "By" / "Written by" labels
static BYLINE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:written\s+|posted\s+|published\s+)?by[:\s]+").expect("BYLINE_PREFIX regex")
});

// ============================================================
// TITLE
// ============================================================

/// Text of the `<title>` element, `None` when missing or blank.
#[must_use]
pub fn title_element(page: &Page<'_>) -> Option<String> {
    dom::select_first_in(page.doc, "head title, title").and_then(|t| dom::clean_text_of(&t))
}

fn first_h1(page: &Page<'_>) -> Option<String> {
    dom::select_first_in(page.doc, "body h1").and_then(|h| dom::clean_text_of(&h))
}

fn first_heading(page: &Page<'_>) -> Option<String> {
    page.doc
        .select("body h2, body h3")
        .iter()
        .find_map(|h| dom::clean_text_of(&h))
}

/// Title fallbacks once `<title>`, meta tags and JSON-LD are exhausted.
pub const TITLE_FALLBACKS: &[Strategy<String>] = &[first_h1, first_heading];

// ============================================================
// AUTHOR
// ============================================================

fn rel_author(page: &Page<'_>) -> Option<String> {
    page.doc
        .select(r#"a[rel="author"], link[rel="author"][title]"#)
        .iter()
        .find_map(|a| dom::non_empty_attribute(&a, "title").or_else(|| dom::clean_text_of(&a)))
        .and_then(|name| normalize_author(&name))
}

fn itemprop_author(page: &Page<'_>) -> Option<String> {
    page.doc
        .select(r#"[itemprop="author"] [itemprop="name"], [itemprop="author"]"#)
        .iter()
        .find_map(|el| dom::non_empty_attribute(&el, "content").or_else(|| dom::clean_text_of(&el)))
        .and_then(|name| normalize_author(&name))
}

fn byline_class(page: &Page<'_>) -> Option<String> {
    page.doc
        .select(".byline, .author, .author-name, .post-author, [class*='byline']")
        .iter()
        .filter_map(|el| dom::clean_text_of(&el))
        .find_map(|text| normalize_author(&text))
}

/// Author fallbacks searched in the body.
pub const AUTHOR_FALLBACKS: &[Strategy<String>] = &[rel_author, itemprop_author, byline_class];

/// Clean up a byline into an author name.
///
/// Strips "By" prefixes, e-mail addresses and handles, then validates.
#[must_use]
pub fn normalize_author(raw: &str) -> Option<String> {
    let name = BYLINE_PREFIX.replace(raw, "");
    let name = EMAIL_PATTERN.replace_all(&name, "");
    let name = TWITTER_PATTERN.replace_all(&name, "");
    let name = dom::clean_text(&name);
    let name = name.trim_matches(|c: char| c == ',' || c == '|' || c == '-').trim();

    if validate_metadata_name(name) {
        Some(name.to_string())
    } else {
        None
    }
}

// ============================================================
// DATE
// ============================================================

fn itemprop_date(page: &Page<'_>) -> Option<String> {
    page.doc
        .select(r#"[itemprop="datePublished"], [itemprop="dateCreated"]"#)
        .iter()
        .find_map(|el| {
            dom::non_empty_attribute(&el, "datetime")
                .or_else(|| dom::non_empty_attribute(&el, "content"))
                .or_else(|| dom::clean_text_of(&el))
        })
        .map(|d| normalize_date(&d))
}

fn time_element(page: &Page<'_>) -> Option<String> {
    page.doc
        .select("time[datetime]")
        .iter()
        .find_map(|t| dom::non_empty_attribute(&t, "datetime"))
        .map(|d| normalize_date(&d))
}

/// Date fallbacks searched in the body.
pub const DATE_FALLBACKS: &[Strategy<String>] = &[itemprop_date, time_element];

// ============================================================
// LANGUAGE
// ============================================================

fn html_lang(page: &Page<'_>) -> Option<String> {
    dom::select_first_in(page.doc, "html")
        .and_then(|html| {
            dom::non_empty_attribute(&html, "lang").or_else(|| dom::non_empty_attribute(&html, "xml:lang"))
        })
        .and_then(|lang| normalize_language(&lang))
}

fn body_lang(page: &Page<'_>) -> Option<String> {
    dom::select_first_in(page.doc, "body")
        .and_then(|body| dom::non_empty_attribute(&body, "lang"))
        .and_then(|lang| normalize_language(&lang))
}

/// Language fallbacks.
pub const LANGUAGE_FALLBACKS: &[Strategy<String>] = &[html_lang, body_lang];
