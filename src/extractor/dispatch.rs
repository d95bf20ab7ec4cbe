//! Dispatcher
//!
//! Chooses a parser from the source URL and the page markup, runs it and
//! grades the outcome. The HTML5 tree builder accepts any text, so the only
//! input that cannot be parsed is binary data, reported as
//! [`ExtractionStatus::Failed`].

use dom_query::Document;
use url::Url;

use super::{generic, reddit, youtube, Parsed};
use crate::document::{Document as ExtractedDocument, Extraction, ExtractionStatus, ParserKind};
use crate::encoding::{looks_binary, transcode_to_utf8};
use crate::error::Result;
use crate::selector::Page;
use crate::url_utils::{is_reddit_url, is_youtube_url, parse_source_url};
use crate::{dom, Options};

/// Site parsers known to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parser {
    /// Reddit thread pages in any of the supported layouts.
    Reddit,
    /// YouTube watch pages with embedded video data.
    YouTube,
    /// Everything else.
    Generic,
}

impl Parser {
    /// Pick the parser for a page.
    ///
    /// Reddit is chosen only when the host is a Reddit domain and the markup
    /// carries both a title and a comment section marker. YouTube is chosen
    /// only when the host is a YouTube domain and a script embeds the video
    /// data.
    #[must_use]
    pub fn select(doc: &Document, url: &Url) -> Self {
        if is_reddit_url(url) && reddit::looks_like_thread(doc) {
            Self::Reddit
        } else if is_youtube_url(url) && youtube::looks_like_video(doc) {
            Self::YouTube
        } else {
            Self::Generic
        }
    }

    #[must_use]
    pub const fn kind(self) -> ParserKind {
        match self {
            Self::Reddit => ParserKind::Reddit,
            Self::YouTube => ParserKind::YouTube,
            Self::Generic => ParserKind::Generic,
        }
    }

    fn extract(self, page: &Page<'_>, source: &str, options: &Options) -> Parsed {
        match self {
            Self::Reddit => reddit::extract_page(page, source, options),
            Self::YouTube => youtube::extract_page(page, source, options),
            Self::Generic => generic::extract_page(page, source, options),
        }
    }
}

/// Extract a page with default options.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidUrl`] when `url` is not an absolute
/// http(s) URL. Every problem with the HTML itself is reported through
/// [`Extraction::status`] and [`Extraction::warnings`].
///
/// # Example
///
/// ```rust
/// use shieldscrape::{extract, ExtractionStatus};
///
/// let html = r#"<html><head><title>T</title></head><body><p>Hello</p></body></html>"#;
/// let extraction = extract(html, "https://example.com/page")?;
/// assert_eq!(extraction.document.title.as_deref(), Some("T"));
/// assert_eq!(extraction.status, ExtractionStatus::Success);
/// # Ok::<(), shieldscrape::Error>(())
/// ```
pub fn extract(html: &str, url: &str) -> Result<Extraction> {
    extract_with_options(html, url, &Options::default())
}

/// Extract a page with custom options.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidUrl`] when `url` is not an absolute
/// http(s) URL.
pub fn extract_with_options(html: &str, url: &str, options: &Options) -> Result<Extraction> {
    let source = url.trim();
    let base = parse_source_url(source)?;

    if looks_binary(html) {
        tracing::warn!(url = source, "input is binary, nothing extracted");
        return Ok(Extraction {
            document: ExtractedDocument::empty(source),
            status: ExtractionStatus::Failed,
            parser: ParserKind::Generic,
            warnings: vec!["input is not HTML text".to_string()],
        });
    }

    let doc = dom::parse(html);
    let parser = Parser::select(&doc, &base);
    tracing::debug!(url = source, parser = ?parser, "parser selected");

    let page = Page::new(&doc, &base);
    let Parsed {
        document,
        mut warnings,
    } = parser.extract(&page, source, options);

    if document.text.is_empty() && warnings.is_empty() {
        warnings.push("empty content".to_string());
    }
    let status = if warnings.is_empty() {
        ExtractionStatus::Success
    } else {
        tracing::warn!(url = source, parser = ?parser, ?warnings, "partial extraction");
        ExtractionStatus::Partial
    };

    Ok(Extraction {
        document,
        status,
        parser: parser.kind(),
        warnings,
    })
}

/// Extract a page given as raw bytes, detecting its character encoding.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidUrl`] when `url` is not an absolute
/// http(s) URL.
pub fn extract_bytes(html: &[u8], url: &str) -> Result<Extraction> {
    extract_bytes_with_options(html, url, &Options::default())
}

/// Extract a page given as raw bytes with custom options.
///
/// The encoding comes from a byte order mark, then a `<meta>` charset
/// declaration, defaulting to UTF-8. Undecodable bytes become U+FFFD.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidUrl`] when `url` is not an absolute
/// http(s) URL.
pub fn extract_bytes_with_options(html: &[u8], url: &str, options: &Options) -> Result<Extraction> {
    let html = transcode_to_utf8(html);
    extract_with_options(&html, url, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const THREAD: &str = r#"<html><head><title>A thread : rust</title></head><body>
        <div class="thing link" data-author="ferris" data-subreddit="rust" data-score="5">
            <p class="title"><a class="title" href="/r/rust/comments/1/a_thread/">A thread</a></p>
            <div class="expando"><div class="md"><p>Post body.</p></div></div>
        </div>
        <div class="commentarea">
            <div class="thing comment" data-author="alice"><div class="md"><p>Hi.</p></div></div>
        </div></body></html>"#;

    fn url(s: &str) -> Url {
        match Url::parse(s) {
            Ok(url) => url,
            Err(e) => panic!("bad test URL {s}: {e}"),
        }
    }

    #[test]
    fn test_select_reddit_with_comment_marker() {
        let doc = dom::parse(THREAD);
        for host in ["https://old.reddit.com/r/rust/", "https://www.reddit.com/r/rust/"] {
            assert_eq!(Parser::select(&doc, &url(host)), Parser::Reddit);
        }
    }

    #[test]
    fn test_select_generic_without_comment_marker() {
        let doc = dom::parse("<html><head><title>r/rust</title></head><body><p>Hot posts</p></body></html>");
        assert_eq!(Parser::select(&doc, &url("https://old.reddit.com/r/rust/")), Parser::Generic);
    }

    #[test]
    fn test_select_generic_for_other_hosts() {
        let doc = dom::parse(THREAD);
        assert_eq!(Parser::select(&doc, &url("https://example.com/r/rust/")), Parser::Generic);
        assert_eq!(Parser::select(&doc, &url("https://notreddit.com/")), Parser::Generic);
    }

    #[test]
    fn test_select_youtube_with_embedded_data() {
        let doc = dom::parse(
            r#"<html><head><script>var ytInitialData = {"contents":{}};</script></head><body></body></html>"#,
        );
        assert_eq!(
            Parser::select(&doc, &url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")),
            Parser::YouTube
        );
        assert_eq!(Parser::select(&doc, &url("https://example.com/watch")), Parser::Generic);

        let plain = dom::parse("<html><head><title>YouTube</title></head><body><p>Home</p></body></html>");
        assert_eq!(Parser::select(&plain, &url("https://www.youtube.com/")), Parser::Generic);
    }

    #[test]
    fn test_reddit_extraction_succeeds() {
        let extraction = match extract(THREAD, "https://old.reddit.com/r/rust/comments/1/a_thread/") {
            Ok(extraction) => extraction,
            Err(e) => panic!("extraction failed: {e}"),
        };
        assert_eq!(extraction.parser, ParserKind::Reddit);
        assert_eq!(extraction.status, ExtractionStatus::Success, "{:?}", extraction.warnings);
        assert_eq!(extraction.document.title.as_deref(), Some("A thread"));
        assert!(extraction.document.text.starts_with("Post body."));
    }

    #[test]
    fn test_empty_html_is_partial() {
        let extraction = match extract("", "https://example.com") {
            Ok(extraction) => extraction,
            Err(e) => panic!("extraction failed: {e}"),
        };
        assert_eq!(extraction.status, ExtractionStatus::Partial);
        assert_eq!(extraction.document.url, "https://example.com");
        assert!(extraction.document.text.is_empty());
        assert!(extraction.document.markdown.is_empty());
        assert!(extraction.document.title.is_none());
    }

    #[test]
    fn test_binary_input_fails() {
        let extraction = match extract_bytes(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR", "https://example.com/a.png") {
            Ok(extraction) => extraction,
            Err(e) => panic!("extraction failed: {e}"),
        };
        assert_eq!(extraction.status, ExtractionStatus::Failed);
        assert_eq!(extraction.document, ExtractedDocument::empty("https://example.com/a.png"));
    }

    #[test]
    fn test_bytes_are_transcoded() {
        let html = b"<html><head><meta charset=\"iso-8859-1\"><title>Caf\xE9</title></head><body><p>Men\xFA</p></body></html>";
        let extraction = match extract_bytes(html, "https://example.com/") {
            Ok(extraction) => extraction,
            Err(e) => panic!("extraction failed: {e}"),
        };
        assert_eq!(extraction.document.title.as_deref(), Some("Café"));
        assert_eq!(extraction.document.text, "Menú");
    }

    #[test]
    fn test_invalid_url_is_error() {
        assert!(matches!(extract("<p>x</p>", "not a url"), Err(Error::InvalidUrl(_))));
        assert!(matches!(extract("<p>x</p>", "ftp://example.com/"), Err(Error::InvalidUrl(_))));
    }
}
