//! Charset detection, transcoding and binary-input detection.
//!
//! Raw bytes from the transport or a local file are decoded here before
//! extraction. The charset comes from, in order: a byte-order mark, the
//! HTTP `Content-Type` header, a `<meta>` declaration in the first 1024
//! bytes, and finally UTF-8.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes of the document head scanned for charset declarations.
const SNIFF_LEN: usize = 1024;

/// Characters scanned when deciding whether input is binary.
const BINARY_SNIFF_CHARS: usize = 1024;

/// `charset=` inside either `<meta charset>` or an http-equiv content value.
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("META_CHARSET regex")
});

/// `charset=` parameter of a `Content-Type` header value.
static HEADER_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i);\s*charset\s*=\s*["']?([^"'\s;]+)"#).expect("HEADER_CHARSET regex")
});

/// Encoding named by a `<meta>` charset declaration near the top of `html`.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    declared_charset(&head, &META_CHARSET).unwrap_or(UTF_8)
}

/// Encoding named by the `charset` parameter of a `Content-Type` header.
#[must_use]
pub fn encoding_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    declared_charset(content_type, &HEADER_CHARSET)
}

fn declared_charset(haystack: &str, pattern: &Regex) -> Option<&'static Encoding> {
    let label = pattern.captures(haystack)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}

/// Decode `html` to UTF-8 using the detected encoding.
///
/// Invalid sequences become U+FFFD instead of failing.
///
/// # Examples
///
/// ```
/// use shieldscrape::encoding::transcode_to_utf8;
///
/// let html = b"<meta charset=\"iso-8859-1\"><p>Caf\xE9</p>";
/// assert!(transcode_to_utf8(html).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    decode_with(html, detect_encoding(html))
}

/// Decode `body`, preferring the charset of the HTTP `Content-Type` header.
#[must_use]
pub fn transcode_response(body: &[u8], content_type: Option<&str>) -> String {
    let header_encoding = Encoding::for_bom(body)
        .map(|(encoding, _)| encoding)
        .or_else(|| content_type.and_then(encoding_from_content_type));

    match header_encoding {
        Some(encoding) => decode_with(body, encoding),
        None => transcode_to_utf8(body),
    }
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> String {
    if encoding == UTF_8 {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        return String::from_utf8_lossy(bytes).into_owned();
    }
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Check whether decoded input is binary rather than markup.
///
/// Input is binary when it contains a NUL character or when more than a
/// tenth of its leading characters are control characters other than
/// whitespace. Empty input is not binary.
#[must_use]
pub fn looks_binary(input: &str) -> bool {
    let mut total = 0usize;
    let mut control = 0usize;

    for c in input.chars().take(BINARY_SNIFF_CHARS) {
        if c == '\0' {
            return true;
        }
        total += 1;
        if (c.is_control() && !c.is_whitespace()) || c == '\u{FFFD}' {
            control += 1;
        }
    }

    total > 0 && control * 10 > total
}
