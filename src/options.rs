//! Configuration options for content extraction.
//!
//! The `Options` struct controls extraction behavior for both parsers.

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use shieldscrape::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     include_comments: false,
///     favor_precision: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Render the Reddit comment forest after the post body.
    ///
    /// Default: `true`
    pub include_comments: bool,

    /// Keep hyperlinks as `[text](url)` in Markdown output.
    ///
    /// When disabled only the anchor text is kept. Links are still collected
    /// into `Document::links` either way.
    ///
    /// Default: `true`
    pub markdown_links: bool,

    /// Tune the generic extractor for precision.
    ///
    /// When enabled, link-dense lists and divs inside the selected content
    /// block (related-article lists, tag clouds) are dropped as well.
    ///
    /// Default: `false`
    pub favor_precision: bool,

    /// Author names to filter out during extraction.
    ///
    /// Names containing any of these strings (case-insensitive) are removed.
    /// Useful for site-wide bylines such as "Staff" or "Editorial Team".
    ///
    /// Default: `None`
    pub author_blacklist: Option<Vec<String>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            include_comments: true,
            markdown_links: true,
            favor_precision: false,
            author_blacklist: None,
        }
    }
}

impl Options {
    /// Check if an author name matches the blacklist.
    #[must_use]
    pub fn is_blacklisted_author(&self, author: &str) -> bool {
        let Some(blacklist) = &self.author_blacklist else {
            return false;
        };
        let author_lower = author.to_lowercase();
        blacklist
            .iter()
            .any(|blocked| author_lower.contains(&blocked.to_lowercase()))
    }
}
