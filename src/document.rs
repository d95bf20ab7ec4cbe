//! Result types for extraction output.
//!
//! [`Document`] is the uniform record every parser produces. Reddit threads
//! are parsed into [`RedditThread`] first and then flattened into a
//! `Document`; the thread type is public for callers that want the comment
//! forest itself. YouTube watch pages go through [`YouTubeVideo`] the same
//! way.

use serde::{Deserialize, Serialize};

/// Normalized, format-agnostic content of one page.
///
/// `text` and `markdown` are always present (possibly empty). Every other
/// field is absent rather than filled with a placeholder when it could not
/// be extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Page or thread title.
    pub title: Option<String>,

    /// Author name.
    pub author: Option<String>,

    /// Publication date, ISO-8601 when it could be parsed, raw otherwise.
    pub date: Option<String>,

    /// Page description (meta description, OpenGraph, JSON-LD).
    pub description: Option<String>,

    /// Content language as an ISO 639-1 code.
    pub language: Option<String>,

    /// Source URL as supplied by the caller.
    pub url: String,

    /// Main content as plain text.
    pub text: String,

    /// Main content as Markdown.
    pub markdown: String,

    /// Absolute links discovered in the content, first-seen order, no duplicates.
    pub links: Vec<String>,
}

impl Document {
    /// Document carrying only the source URL, used when nothing could be extracted.
    #[must_use]
    pub fn empty(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }
}

/// Outcome of an extraction, reported alongside the [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    /// Every field the parser looks for was found and the body is non-empty.
    Success,
    /// The document is usable but some fields or the body are missing.
    Partial,
    /// The input could not be parsed; only `url` is populated.
    Failed,
}

impl ExtractionStatus {
    /// Lowercase label used in logs and the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which parser produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// Reddit thread parser.
    Reddit,
    /// YouTube watch page parser.
    YouTube,
    /// Generic boilerplate-removal extractor.
    Generic,
}

/// Result of a dispatched extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The extracted document.
    pub document: Document,

    /// Overall status of the extraction.
    pub status: ExtractionStatus,

    /// Parser the dispatcher selected.
    pub parser: ParserKind,

    /// Non-fatal issues encountered during extraction, such as:
    /// - selector strategies exhausted for a field
    /// - no content block found
    /// - binary input that could not be parsed
    pub warnings: Vec<String>,
}

/// A Reddit thread: post metadata, post body and the comment forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedditThread {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Subreddit name without the `r/` prefix.
    pub subreddit: Option<String>,
    pub score: Option<i64>,
    /// Post timestamp, ISO-8601 when parseable.
    pub date: Option<String>,
    /// Post body as plain text (empty for link posts).
    pub text: String,
    /// Post body as Markdown.
    pub markdown: String,
    pub url: String,
    /// Root comments in source order; replies hang off `children`.
    pub comments: Vec<RedditComment>,
}

impl RedditThread {
    /// Total number of comments in the forest, replies included.
    #[must_use]
    pub fn comment_count(&self) -> usize {
        self.comments.iter().map(RedditComment::subtree_len).sum()
    }
}

/// One comment in a Reddit comment forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedditComment {
    /// Author name without the `u/` prefix; absent for deleted comments.
    pub author: Option<String>,
    /// The author was shown as `[deleted]` or `[removed]`.
    pub deleted: bool,
    pub text: String,
    pub markdown: String,
    pub score: Option<i64>,
    pub timestamp: Option<String>,
    /// Nesting level, 0 for root comments.
    pub depth: usize,
    pub children: Vec<RedditComment>,
}

impl RedditComment {
    /// Number of comments in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}

/// A YouTube video, read from the JSON a watch page embeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouTubeVideo {
    /// The 11-character video id.
    pub video_id: Option<String>,
    pub title: Option<String>,
    /// Channel display name.
    pub channel: Option<String>,
    pub description: String,
    /// Links inside the description, redirect wrappers removed.
    pub description_links: Vec<DescriptionLink>,
    /// View count as displayed (`1,234,567 views`), or the raw count.
    pub view_count: Option<String>,
    /// Like count as displayed (`12K`).
    pub like_count: Option<String>,
    /// Upload date, ISO-8601 when parseable.
    pub upload_date: Option<String>,
    pub url: String,
}

/// A link in a video description and the text it covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionLink {
    pub text: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(children: Vec<RedditComment>) -> RedditComment {
        RedditComment {
            children,
            ..RedditComment::default()
        }
    }

    #[test]
    fn comment_count_includes_replies() {
        let thread = RedditThread {
            comments: vec![comment(vec![comment(vec![comment(vec![])])]), comment(vec![])],
            ..RedditThread::default()
        };
        assert_eq!(thread.comment_count(), 4);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = match serde_json::to_string(&ExtractionStatus::Partial) {
            Ok(json) => json,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "\"partial\"");
        assert_eq!(ExtractionStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn parser_kind_serializes_lowercase() {
        for (kind, name) in [
            (ParserKind::Reddit, "\"reddit\""),
            (ParserKind::YouTube, "\"youtube\""),
            (ParserKind::Generic, "\"generic\""),
        ] {
            match serde_json::to_string(&kind) {
                Ok(json) => assert_eq!(json, name),
                Err(e) => panic!("serialization failed: {e}"),
            }
        }
    }

    #[test]
    fn empty_document_keeps_url() {
        let document = Document::empty("https://example.com");
        assert_eq!(document.url, "https://example.com");
        assert!(document.text.is_empty() && document.markdown.is_empty());
        assert!(document.title.is_none() && document.links.is_empty());
    }
}
