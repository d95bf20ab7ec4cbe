//! URL Utility Functions
//!
//! Link normalization for discovered hrefs, source URL validation, and the
//! Reddit and YouTube host helpers used by the dispatcher and the transport.
//!
//! Every rewrite here is idempotent: applying it to its own output returns
//! the output unchanged. In particular, a host is never prepended to a
//! reference that already carries it.

use std::collections::HashSet;

use url::Url;

use crate::error::{Error, Result};

/// Schemes that are navigable but not resolvable; kept exactly as written.
const OPAQUE_SCHEMES: &[&str] = &["mailto", "tel"];

/// Schemes that resolve to a fetchable resource.
const NAVIGABLE_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Reddit hosts that serve the new layout and have an old-layout twin.
const REDDIT_REWRITE_HOSTS: &[&str] = &["reddit.com", "www.reddit.com", "new.reddit.com"];

/// Check if a string is a valid absolute URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse and validate a caller-supplied source URL.
///
/// # Errors
/// Returns [`Error::InvalidUrl`] unless `url` is an absolute http(s) URL with a host.
pub fn parse_source_url(url: &str) -> Result<Url> {
    match is_absolute_url(url) {
        (true, Some(parsed)) => Ok(parsed),
        _ => Err(Error::InvalidUrl(url.to_string())),
    }
}

/// Resolve a hyperlink reference against a base URL string.
///
/// Returns `None` for references that are not navigable (`javascript:`,
/// `data:`, fragment-only, empty) or when `base_url` is not absolute.
///
/// # Examples
/// ```
/// use shieldscrape::url_utils::normalize;
///
/// let base = "https://example.com/articles/page";
/// assert_eq!(normalize("/x", base), Some("https://example.com/x".to_string()));
/// assert_eq!(normalize("mailto:a@b.org", base), Some("mailto:a@b.org".to_string()));
/// assert_eq!(normalize("#top", base), None);
/// assert_eq!(normalize("javascript:void(0)", base), None);
/// ```
#[must_use]
pub fn normalize(href: &str, base_url: &str) -> Option<String> {
    let (_, base) = is_absolute_url(base_url);
    normalize_link(href, &base?)
}

/// Resolve a hyperlink reference against a parsed base URL.
///
/// Absolute references come back in the same serialized form a resolved
/// relative reference would take, so the function is idempotent and the same
/// target never yields two spellings.
#[must_use]
pub fn normalize_link(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if let Some(scheme) = scheme_of(href) {
        let scheme = scheme.to_ascii_lowercase();
        if OPAQUE_SCHEMES.contains(&scheme.as_str()) {
            return Some(href.to_string());
        }
        if !NAVIGABLE_SCHEMES.contains(&scheme.as_str()) {
            return None;
        }
        return match Url::parse(href) {
            Ok(url) if url.host().is_some() => Some(url.into()),
            _ => None,
        };
    }

    // "example.com/x" on example.com already names the host; joining it as a
    // path would yield https://example.com/example.com/x.
    if let Some(host) = base.host_str() {
        if starts_with_host(href, host) {
            let candidate = format!("{}://{href}", base.scheme());
            return Url::parse(&candidate).ok().map(String::from);
        }
    }

    match base.join(href) {
        Ok(resolved) if NAVIGABLE_SCHEMES.contains(&resolved.scheme()) => Some(resolved.into()),
        _ => None,
    }
}

/// Return the scheme of `href` if it starts with one (`scheme:`).
fn scheme_of(href: &str) -> Option<&str> {
    let colon = href.find(':')?;
    let candidate = &href[..colon];
    let mut chars = candidate.chars();
    let first = chars.next()?;
    if first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        // "localhost:8080/path" style references are host:port, not schemes.
        let rest = &href[colon + 1..];
        if rest.chars().next().is_some_and(|c| c.is_ascii_digit()) && !rest.starts_with("//") {
            return None;
        }
        Some(candidate)
    } else {
        None
    }
}

/// Check whether a scheme-less reference begins with `host` (or `www.` + host).
fn starts_with_host(href: &str, host: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();
    let bare = host.strip_prefix("www.").unwrap_or(&host);

    [host.as_str(), bare]
        .iter()
        .flat_map(|h| [h.to_string(), format!("www.{h}")])
        .any(|h| {
            lower == h
                || lower
                    .strip_prefix(h.as_str())
                    .is_some_and(|rest| rest.starts_with(['/', '?', '#', ':']))
        })
}

/// Check whether a host belongs to Reddit (`reddit.com` or any subdomain).
#[must_use]
pub fn is_reddit_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    host == "reddit.com" || host.ends_with(".reddit.com")
}

/// Check whether a URL points at Reddit.
#[must_use]
pub fn is_reddit_url(url: &Url) -> bool {
    url.host_str().is_some_and(is_reddit_host)
}

/// Check whether a host serves YouTube watch pages.
#[must_use]
pub fn is_youtube_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    host == "youtube.com" || host.ends_with(".youtube.com") || host == "youtu.be"
}

/// Check whether a URL points at YouTube.
#[must_use]
pub fn is_youtube_url(url: &Url) -> bool {
    url.host_str().is_some_and(is_youtube_host)
}

/// Rewrite a Reddit URL to the old layout, which is easier to parse.
///
/// Only `reddit.com`, `www.reddit.com` and `new.reddit.com` are rewritten.
/// `old.reddit.com` and non-Reddit URLs are returned unchanged, so applying
/// the rewrite twice is the same as applying it once.
///
/// # Examples
/// ```
/// use shieldscrape::url_utils::prefer_old_reddit;
///
/// let once = prefer_old_reddit("https://www.reddit.com/r/rust/comments/abc/");
/// assert_eq!(once, "https://old.reddit.com/r/rust/comments/abc/");
/// assert_eq!(prefer_old_reddit(&once), once);
/// ```
#[must_use]
pub fn prefer_old_reddit(url_str: &str) -> String {
    let Some(mut url) = parse_url(url_str) else {
        return url_str.to_string();
    };

    let rewrite = url
        .host_str()
        .is_some_and(|h| REDDIT_REWRITE_HOSTS.contains(&h.to_ascii_lowercase().as_str()));
    if !rewrite || url.set_host(Some("old.reddit.com")).is_err() {
        return url_str.to_string();
    }

    url.into()
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Ordered, deduplicated collection of normalized links.
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    links: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `href` against `base` and keep it if it is new.
    pub fn push_href(&mut self, href: &str, base: &Url) -> Option<String> {
        let link = normalize_link(href, base)?;
        self.push(link.clone());
        Some(link)
    }

    /// Add an already-normalized link, ignoring duplicates.
    pub fn push(&mut self, link: String) {
        if self.seen.insert(link.clone()) {
            self.links.push(link);
        }
    }

    /// Append every link of `other`, keeping first-seen order.
    pub fn extend(&mut self, other: impl IntoIterator<Item = String>) {
        for link in other {
            self.push(link);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.links
    }
}
