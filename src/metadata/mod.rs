//! Metadata extraction module.
//!
//! Collects title, author, date, description and language from a page.
//! Sources are examined in priority order and each only fills fields that
//! are still absent:
//!
//! 1. the `<title>` element (title only)
//! 2. HTML meta tags (standard, Open Graph, Twitter, Dublin Core)
//! 3. JSON-LD (Schema.org structured data)
//! 4. DOM fallbacks (headings, bylines, `<time>`, `<html lang>`)

pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use crate::selector::{first_match, Page};
use crate::Options;

pub use dom_extraction::{normalize_author, title_element};
pub use json_ld::extract_json_ld;
pub use meta_tags::{examine_meta, normalize_date, normalize_language, validate_metadata_name};

/// Page-level metadata shared by every parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

/// Extract all metadata from a page.
#[must_use]
pub fn extract_metadata(page: &Page<'_>, options: &Options) -> PageMetadata {
    let mut metadata = PageMetadata {
        title: title_element(page),
        ..PageMetadata::default()
    };

    metadata = examine_meta(page.doc, metadata);
    metadata = extract_json_ld(page.doc, metadata);

    if metadata.title.is_none() {
        metadata.title = first_match("title", dom_extraction::TITLE_FALLBACKS, page);
    }
    if metadata.author.is_none() {
        metadata.author = first_match("author", dom_extraction::AUTHOR_FALLBACKS, page);
    }
    if metadata.date.is_none() {
        metadata.date = first_match("date", dom_extraction::DATE_FALLBACKS, page);
    }
    if metadata.language.is_none() {
        metadata.language = first_match("language", dom_extraction::LANGUAGE_FALLBACKS, page);
    }

    post_process_metadata(metadata, options)
}

/// Drop blank values and blacklisted authors.
fn post_process_metadata(metadata: PageMetadata, options: &Options) -> PageMetadata {
    fn non_blank(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    PageMetadata {
        title: non_blank(metadata.title),
        author: non_blank(metadata.author).filter(|a| !options.is_blacklisted_author(a)),
        date: non_blank(metadata.date),
        description: non_blank(metadata.description),
        language: non_blank(metadata.language),
    }
}
