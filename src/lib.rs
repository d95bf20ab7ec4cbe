//! # shieldscrape
//!
//! Structured content extraction for web pages, with a browser-profiled
//! HTTP transport in front of it.
//!
//! The extraction core takes raw HTML plus its source URL and produces one
//! uniform [`Document`]. A dispatcher routes Reddit thread pages to a
//! structural parser that rebuilds the comment forest, YouTube watch pages
//! to a parser for their embedded video data, and everything else to a
//! generic boilerplate-removal extractor. Each tolerates incomplete or
//! changing markup: missing fields are reported, never fatal.
//!
//! ## Quick Start
//!
//! ```rust
//! use shieldscrape::{extract, ExtractionStatus};
//!
//! let html = r#"<html><head><title>T</title></head>
//! <body><p>Hello <a href="/x">link</a></p></body></html>"#;
//!
//! let extraction = extract(html, "https://example.com/page")?;
//! assert_eq!(extraction.status, ExtractionStatus::Success);
//! assert_eq!(extraction.document.title.as_deref(), Some("T"));
//! assert_eq!(extraction.document.links, vec!["https://example.com/x"]);
//! # Ok::<(), shieldscrape::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Reddit threads**: old, current (`shreddit-*`) and 2018 redesign
//!   layouts, with nested comments rebuilt into a forest
//! - **YouTube videos**: title, channel, description and its links, view
//!   and like counts, upload date
//! - **Generic pages**: boilerplate removal, semantic and density-based
//!   content block selection
//! - **Metadata**: meta tags, Open Graph, Dublin Core, JSON-LD, DOM fallbacks
//! - **Output**: JSON, Markdown, plain text and colored console renderings
//! - **Transport** (`fetch` feature): blocking client with browser profiles

mod document;
mod error;
mod options;
mod patterns;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Selector infrastructure: boilerplate rules and fallback strategies.
pub mod selector;

/// Content extraction: dispatcher, generic extractor, Reddit and YouTube parsers.
pub mod extractor;

/// Metadata extraction (JSON-LD, HTML meta tags, Open Graph).
pub mod metadata;

/// Structural renderer producing text, Markdown and links.
pub mod render;

/// Markdown building blocks (escaping, code fences, quotes, tables).
pub mod markdown;

/// Link density measures for boilerplate detection.
pub mod link_density;

/// URL utilities: link normalization, source validation, Reddit hosts.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Output serializers.
pub mod output;

/// HTTP transport with browser profiles.
#[cfg(feature = "fetch")]
pub mod fetch;

// Public API - re-exports
pub use document::{
    DescriptionLink, Document, Extraction, ExtractionStatus, ParserKind, RedditComment,
    RedditThread, YouTubeVideo,
};
pub use error::{Error, Result};
pub use extractor::{
    extract, extract_bytes, extract_bytes_with_options, extract_generic, extract_reddit,
    extract_with_options, extract_youtube, parse_thread, parse_video, Parser,
};
pub use options::Options;
pub use output::OutputFormat;
pub use url_utils::{normalize, prefer_old_reddit};
