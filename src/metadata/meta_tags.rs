//! HTML Meta Tag Extraction
//!
//! Extracts metadata from standard HTML meta tags, Open Graph tags, Twitter
//! cards and Dublin Core, and normalizes dates and language codes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use dom_query::{Document, Selection};

use super::PageMetadata;
use crate::dom;

/// Examine HTML meta tags for metadata.
///
/// Only fields still absent in `original` are filled, so callers control
/// precedence by the order in which sources are examined.
#[must_use]
pub fn examine_meta(doc: &Document, original: PageMetadata) -> PageMetadata {
    let mut result = original;

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);

        let name = dom::non_empty_attribute(&meta, "name")
            .or_else(|| dom::non_empty_attribute(&meta, "property"))
            .or_else(|| dom::non_empty_attribute(&meta, "itemprop"))
            .or_else(|| dom::non_empty_attribute(&meta, "http-equiv"))
            .unwrap_or_default()
            .to_lowercase();

        let Some(content) = dom::non_empty_attribute(&meta, "content") else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        match name.as_str() {
            "author" | "article:author" | "dc.creator" | "dcterms.creator" | "byl"
            | "sailthru.author" | "parsely-author" => {
                if result.author.is_none() && validate_metadata_name(&content) {
                    result.author = Some(content);
                }
            }

            "og:title" | "twitter:title" | "dc.title" | "dcterms.title" | "sailthru.title"
            | "parsely-title" | "title" | "headline" => {
                if result.title.is_none() {
                    result.title = Some(dom::clean_text(&content));
                }
            }

            "description" | "og:description" | "twitter:description" | "dc.description"
            | "dcterms.description" => {
                if result.description.is_none() {
                    result.description = Some(dom::clean_text(&content));
                }
            }

            "article:published_time" | "og:article:published_time" | "article:published"
            | "article.published" | "article:created" | "dc.date" | "dc.date.issued"
            | "dcterms.date" | "dcterms.created" | "datepublished" | "sailthru.date"
            | "parsely-pub-date" | "pubdate" | "publish_date" | "publishdate" | "date" => {
                if result.date.is_none() {
                    result.date = Some(normalize_date(&content));
                }
            }

            "og:locale" | "language" | "dc.language" | "dcterms.language" | "content-language"
            | "inlanguage" => {
                if result.language.is_none() {
                    result.language = normalize_language(&content);
                }
            }

            _ => {}
        }
    }

    result
}

/// Validate that a metadata name looks like a real author name.
///
/// Filters out:
/// - Empty or very short names
/// - Names that look like URLs or e-mail addresses
/// - Names with too many digits or special characters
/// - Names that look like JSON
#[must_use]
pub fn validate_metadata_name(name: &str) -> bool {
    let name = name.trim();

    if name.chars().count() < 2 || name.len() > 120 {
        return false;
    }

    // A long single token is an identifier, not a name.
    if name.len() > 20 && !name.contains(' ') {
        return false;
    }

    if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("www.") {
        return false;
    }

    if name.contains('@') && name.contains('.') {
        return false;
    }

    if name.starts_with('{') || name.starts_with('[') {
        return false;
    }

    let digit_count = name.chars().filter(char::is_ascii_digit).count();
    if digit_count > 3 {
        return false;
    }

    let special_count = name
        .chars()
        .filter(|c| {
            !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '\'' | '.' | ',')
        })
        .count();

    special_count <= 2
}

/// Normalize a date string to ISO-8601.
///
/// - RFC 3339 timestamps become UTC `YYYY-MM-DDTHH:MM:SSZ`
/// - Zone-less timestamps become `YYYY-MM-DDTHH:MM:SS`
/// - Dates without time become `YYYY-MM-DD`
///
/// Anything unparseable is returned trimmed but otherwise unchanged.
#[must_use]
pub fn normalize_date(date_str: &str) -> String {
    let date_str = date_str.trim();
    parse_date(date_str).unwrap_or_else(|| date_str.to_string())
}

fn parse_date(date_str: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true));
    }

    // Offsets without a colon: 2024-03-15T10:30:00.000000+0000
    if let Ok(dt) = DateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true));
    }

    // Old Reddit tooltip form: "Mon Mar 4 12:00:00 2024 UTC"
    if let Some(naive) = date_str.strip_suffix(" UTC") {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%a %b %e %H:%M:%S %Y") {
            return Some(dt.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, fmt) {
            return Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
        }
    }

    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%B %d, %Y", // January 15, 2024
        "%b %d, %Y", // Jan 15, 2024
        "%d %B %Y",  // 15 January 2024
        "%d %b %Y",  // 15 Jan 2024
    ];
    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(date_str, fmt)
            .ok()
            .map(|date| date.format("%Y-%m-%d").to_string())
    })
}

/// Reduce a language tag (`en-US`, `de_DE`, `FR`) to its ISO 639-1 code.
///
/// Returns `None` unless the primary subtag is two ASCII letters.
#[must_use]
pub fn normalize_language(tag: &str) -> Option<String> {
    let primary = tag.trim().split(['-', '_']).next()?.trim();
    if primary.len() == 2 && primary.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(primary.to_ascii_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_meta_tags() {
        let html = r#"<!DOCTYPE html>
        <html>
        <head>
            <meta name="author" content="John Smith">
            <meta name="description" content="A test   article.">
        </head>
        <body></body>
        </html>"#;

        let doc = Document::from(html);
        let metadata = examine_meta(&doc, PageMetadata::default());

        assert_eq!(metadata.author, Some("John Smith".to_string()));
        assert_eq!(metadata.description, Some("A test article.".to_string()));
    }

    #[test]
    fn test_open_graph_and_twitter() {
        let html = r#"<head>
            <meta property="og:title" content="OG Title">
            <meta name="twitter:title" content="Twitter Title">
            <meta property="og:locale" content="en_GB">
            <meta property="article:published_time" content="2024-03-15T10:30:00+02:00">
        </head>"#;

        let doc = Document::from(html);
        let metadata = examine_meta(&doc, PageMetadata::default());

        assert_eq!(metadata.title, Some("OG Title".to_string()));
        assert_eq!(metadata.language, Some("en".to_string()));
        assert_eq!(metadata.date, Some("2024-03-15T08:30:00Z".to_string()));
    }

    #[test]
    fn test_dublin_core() {
        let html = r#"<head>
            <meta name="DC.creator" content="Jane Doe">
            <meta name="DC.title" content="DC Title">
            <meta name="DC.date" content="2024-03-15">
        </head>"#;

        let doc = Document::from(html);
        let metadata = examine_meta(&doc, PageMetadata::default());

        assert_eq!(metadata.author, Some("Jane Doe".to_string()));
        assert_eq!(metadata.title, Some("DC Title".to_string()));
        assert_eq!(metadata.date, Some("2024-03-15".to_string()));
    }

    #[test]
    fn test_preserves_existing_metadata() {
        let doc = Document::from(r#"<meta name="author" content="New Author">"#);
        let original = PageMetadata {
            author: Some("Original Author".to_string()),
            ..PageMetadata::default()
        };

        let metadata = examine_meta(&doc, original);
        assert_eq!(metadata.author, Some("Original Author".to_string()));
    }

    #[test]
    fn test_validate_metadata_name() {
        assert!(validate_metadata_name("John Smith"));
        assert!(validate_metadata_name("Jean-Pierre"));
        assert!(validate_metadata_name("O'Connor"));
        assert!(validate_metadata_name("Dr. Smith"));

        assert!(!validate_metadata_name(""));
        assert!(!validate_metadata_name("x"));
        assert!(!validate_metadata_name("https://example.com"));
        assert!(!validate_metadata_name("user@example.com"));
        assert!(!validate_metadata_name("{\"name\": \"test\"}"));
        assert!(!validate_metadata_name("1234567890"));
    }

    #[test]
    fn test_normalize_date_formats() {
        assert_eq!(normalize_date("2024-03-15T10:30:00Z"), "2024-03-15T10:30:00Z");
        assert_eq!(normalize_date("2024-03-15T10:30:00+0100"), "2024-03-15T09:30:00Z");
        assert_eq!(normalize_date("2024-03-04T12:00:00.000000+0000"), "2024-03-04T12:00:00Z");
        assert_eq!(normalize_date("2024-03-15T10:30:00"), "2024-03-15T10:30:00");
        assert_eq!(normalize_date(" 2024/03/15 "), "2024-03-15");
        assert_eq!(normalize_date("January 5, 2024"), "2024-01-05");
        assert_eq!(normalize_date("Mon Mar 4 12:00:00 2024 UTC"), "2024-03-04T12:00:00Z");
        assert_eq!(normalize_date("3 hours ago"), "3 hours ago");
    }

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("en-US"), Some("en".to_string()));
        assert_eq!(normalize_language("DE_de"), Some("de".to_string()));
        assert_eq!(normalize_language("fr"), Some("fr".to_string()));
        assert_eq!(normalize_language("english"), None);
        assert_eq!(normalize_language(""), None);
    }
}
