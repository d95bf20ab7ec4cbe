//! HTTP transport with browser profiles.
//!
//! A [`BrowserProfile`] selects the user agent and the browser-specific
//! request headers sent alongside a common set of navigation headers. Reddit
//! URLs are rewritten to the old layout before the request unless disabled.
//! Response bodies are transcoded to UTF-8 using the `Content-Type` charset,
//! then the `<meta>` declaration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::encoding::transcode_response;
use crate::error::{Error, Result};
use crate::url_utils::{parse_source_url, prefer_old_reddit};

/// Browser profile names accepted by [`BrowserProfile::from_str`].
pub const SUPPORTED_BROWSERS: &[&str] = &[
    "chrome", "chrome99", "chrome100", "chrome101", "chrome104", "chrome107", "chrome110",
    "chrome116", "chrome119", "chrome120", "chrome123", "chrome124", "safari", "safari15_3",
    "safari15_5", "safari17_0", "safari17_2_1", "safari18_0", "edge", "edge99", "edge101",
    "firefox", "firefox109",
];

/// Navigation headers every profile sends.
const DEFAULT_HEADERS: &[(&str, &str)] = &[
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("accept-language", "en-US,en;q=0.5"),
    ("dnt", "1"),
    ("upgrade-insecure-requests", "1"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("cache-control", "max-age=0"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFamily {
    Chrome,
    Edge,
    Firefox,
    Safari,
}

impl BrowserFamily {
    /// Version used for an unversioned profile name.
    const fn default_version(self) -> &'static str {
        match self {
            Self::Chrome | Self::Edge => "124",
            Self::Firefox => "125",
            Self::Safari => "18_0",
        }
    }
}

/// A named browser identity: family plus version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserProfile {
    name: &'static str,
    family: BrowserFamily,
    version: &'static str,
}

impl BrowserProfile {
    /// Look up a supported profile by name, case-insensitively.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let canonical = SUPPORTED_BROWSERS.iter().copied().find(|b| *b == name)?;

        let (family, prefix) = [
            (BrowserFamily::Chrome, "chrome"),
            (BrowserFamily::Edge, "edge"),
            (BrowserFamily::Firefox, "firefox"),
            (BrowserFamily::Safari, "safari"),
        ]
        .into_iter()
        .find(|(_, prefix)| canonical.starts_with(prefix))?;

        let version = match &canonical[prefix.len()..] {
            "" => family.default_version(),
            version => version,
        };
        Some(Self {
            name: canonical,
            family,
            version,
        })
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn family(&self) -> BrowserFamily {
        self.family
    }

    /// Major version number (`124` for `chrome124`, `18` for `safari18_0`).
    #[must_use]
    pub fn major_version(&self) -> &'static str {
        self.version.split('_').next().unwrap_or(self.version)
    }

    /// `User-Agent` string for this profile.
    #[must_use]
    pub fn user_agent(&self) -> String {
        let major = self.major_version();
        match self.family {
            BrowserFamily::Chrome => format!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{major}.0.0.0 Safari/537.36"
            ),
            BrowserFamily::Edge => format!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{major}.0.0.0 Safari/537.36 Edg/{major}.0.0.0"
            ),
            BrowserFamily::Firefox => format!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:{major}.0) Gecko/20100101 Firefox/{major}.0"
            ),
            BrowserFamily::Safari => format!(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/{} Safari/605.1.15",
                self.version.replace('_', ".")
            ),
        }
    }

    /// Client hint headers Chromium-based browsers send on navigation.
    fn client_hints(&self) -> Vec<(&'static str, String)> {
        let major = self.major_version();
        let brand = match self.family {
            BrowserFamily::Chrome => "Google Chrome",
            BrowserFamily::Edge => "Microsoft Edge",
            BrowserFamily::Firefox | BrowserFamily::Safari => return Vec::new(),
        };
        vec![
            (
                "sec-ch-ua",
                format!(r#""Chromium";v="{major}", "{brand}";v="{major}", "Not-A.Brand";v="99""#),
            ),
            ("sec-ch-ua-mobile", "?0".to_string()),
            ("sec-ch-ua-platform", r#""Windows""#.to_string()),
        ]
    }
}

impl Default for BrowserProfile {
    fn default() -> Self {
        Self {
            name: "chrome",
            family: BrowserFamily::Chrome,
            version: BrowserFamily::Chrome.default_version(),
        }
    }
}

impl FromStr for BrowserProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| Error::UnknownBrowser(s.to_string()))
    }
}

impl fmt::Display for BrowserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Browser identity presented to the server.
    ///
    /// Default: `chrome`
    pub browser: BrowserProfile,

    /// Whole-request timeout.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Extra headers, overriding the profile's headers of the same name.
    pub headers: Vec<(String, String)>,

    /// Rewrite `reddit.com` URLs to `old.reddit.com` before fetching.
    ///
    /// Default: `true`
    pub prefer_old_reddit: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            browser: BrowserProfile::default(),
            timeout: Duration::from_secs(30),
            headers: Vec::new(),
            prefer_old_reddit: true,
        }
    }
}

/// A fetched page, decoded to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: String,
    pub html: String,
}

fn header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| Error::InvalidHeader(name.to_string()))?;
    let header_value =
        HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(name.to_string()))?;
    Ok((header_name, header_value))
}

/// Request headers for a set of options, custom headers applied last.
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] if a custom header name or value is not
/// valid HTTP.
pub fn build_headers(options: &FetchOptions) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (name, value) in DEFAULT_HEADERS {
        let (name, value) = header(name, value)?;
        headers.insert(name, value);
    }
    for (name, value) in options.browser.client_hints() {
        let (name, value) = header(name, &value)?;
        headers.insert(name, value);
    }
    for (name, value) in &options.headers {
        let (name, value) = header(name, value)?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Blocking HTTP client presenting one browser profile.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    options: FetchOptions,
}

impl Fetcher {
    /// Build a client for the given options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] for malformed custom headers and
    /// [`Error::Http`] if the HTTP client cannot be initialized.
    pub fn new(options: FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(options.browser.user_agent())
            .default_headers(build_headers(&options)?)
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client, options })
    }

    #[must_use]
    pub const fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// URL that [`Fetcher::fetch`] requests for `url`.
    #[must_use]
    pub fn request_url(&self, url: &str) -> String {
        let url = url.trim();
        if self.options.prefer_old_reddit {
            prefer_old_reddit(url)
        } else {
            url.to_string()
        }
    }

    /// Fetch a page and decode its body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for non-http(s) URLs and [`Error::Http`]
    /// for transport failures, timeouts and non-2xx responses.
    pub fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let target = parse_source_url(&self.request_url(url))?;
        tracing::debug!(url = %target, browser = %self.options.browser, "fetching");

        let response = self.client.get(target).send()?.error_for_status()?;
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes()?;

        tracing::debug!(
            url = %final_url,
            bytes = body.len(),
            content_type = content_type.as_deref().unwrap_or(""),
            "fetched"
        );

        Ok(FetchedPage {
            url: final_url,
            html: transcode_response(&body, content_type.as_deref()),
        })
    }
}
