//! Content extraction.
//!
//! # Module Structure
//!
//! - `dispatch`: parser selection, status grading, public entry points
//! - `generic`: boilerplate removal and content block selection
//! - `reddit`: Reddit thread strategies and document flattening
//! - `youtube`: YouTube watch page data strategies and document flattening
//! - `forest`: comment tree reconstruction from a depth-annotated stream
//!
//! # Usage
//!
//! ```rust
//! use shieldscrape::extractor::{Parser, reddit};
//! use shieldscrape::dom;
//!
//! let doc = dom::parse("<title>Thread</title><div class=\"commentarea\"></div>");
//! let url = url::Url::parse("https://old.reddit.com/r/rust/comments/1/x/")?;
//! assert_eq!(Parser::select(&doc, &url), Parser::Reddit);
//! assert!(reddit::looks_like_thread(&doc));
//! # Ok::<(), url::ParseError>(())
//! ```

pub mod dispatch;
pub mod forest;
pub mod generic;
pub mod reddit;
pub mod youtube;

pub use dispatch::{extract, extract_bytes, extract_bytes_with_options, extract_with_options, Parser};
pub use forest::{build_forest, FlatComment};
pub use generic::extract_generic;
pub use reddit::{extract_reddit, parse_score, parse_thread};
pub use youtube::{extract_youtube, parse_video};

use crate::document::Document;

/// A parser's document plus the non-fatal issues it ran into.
pub(crate) struct Parsed {
    pub(crate) document: Document,
    pub(crate) warnings: Vec<String>,
}
