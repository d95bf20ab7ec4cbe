//! YouTube Watch Page Parser
//!
//! A watch page carries its data as JSON assigned in inline scripts:
//!
//! - `ytInitialData`: the rendered page (title, channel, description with
//!   link runs, view and like counts, display date)
//! - `ytInitialPlayerResponse`: `videoDetails` and `microformat`, used as
//!   the fallback for each field
//!
//! Fields are read by ordered strategies over those two blobs, the same way
//! the Reddit parser reads markup. Comments load through a separate API
//! request and are not part of the page, so they are not read here.

use dom_query::Document;
use serde_json::Value;
use url::Url;

use super::Parsed;
use crate::document::{DescriptionLink, Document as ExtractedDocument, YouTubeVideo};
use crate::dom;
use crate::markdown;
use crate::metadata::{extract_metadata, normalize_date};
use crate::patterns::LIKE_COUNT_LABEL;
use crate::selector::Page;
use crate::url_utils::{normalize_link, LinkSet};
use crate::Options;

const INITIAL_DATA: &str = "ytInitialData";
const PLAYER_RESPONSE: &str = "ytInitialPlayerResponse";

const PRIMARY_INFO: &str = "videoPrimaryInfoRenderer";
const SECONDARY_INFO: &str = "videoSecondaryInfoRenderer";

/// Base for the relative URLs found in description runs.
const YOUTUBE_ORIGIN: &str = "https://www.youtube.com/";

/// Check whether a document embeds watch page data.
#[must_use]
pub fn looks_like_video(doc: &Document) -> bool {
    doc.select("script").nodes().iter().any(|node| {
        let text = node.text();
        text.contains(INITIAL_DATA) || text.contains(PLAYER_RESPONSE)
    })
}

/// JSON object assigned to `name` in an inline script.
///
/// Accepts `var name = {...};`, `window["name"] = {...};` and similar forms.
/// Only the first complete JSON value after `=` is read, so trailing script
/// text does not matter.
fn embedded_json(doc: &Document, name: &str) -> Option<Value> {
    doc.select("script").nodes().iter().find_map(|node| {
        let text = node.text();
        let source: &str = &text;
        source.match_indices(name).find_map(|(idx, _)| {
            let rest = source[idx + name.len()..].trim_start();
            let rest = rest.strip_prefix("\"]").unwrap_or(rest).trim_start();
            let rest = rest.strip_prefix('=')?.trim_start();
            serde_json::Deserializer::from_str(rest)
                .into_iter::<Value>()
                .next()?
                .ok()
                .filter(Value::is_object)
        })
    })
}

// =============================================================================
// Embedded data
// =============================================================================

/// The two JSON blobs of a watch page.
#[derive(Debug, Default)]
struct WatchData {
    initial: Option<Value>,
    player: Option<Value>,
}

impl WatchData {
    fn read(doc: &Document) -> Self {
        Self {
            initial: embedded_json(doc, INITIAL_DATA),
            player: embedded_json(doc, PLAYER_RESPONSE),
        }
    }

    fn is_empty(&self) -> bool {
        self.initial.is_none() && self.player.is_none()
    }

    /// A renderer object from the main watch column, such as the primary info.
    fn renderer(&self, name: &str) -> Option<&Value> {
        self.initial
            .as_ref()?
            .pointer("/contents/twoColumnWatchNextResults/results/results/contents")?
            .as_array()?
            .iter()
            .find_map(|item| item.get(name))
    }

    fn video_details(&self) -> Option<&Value> {
        self.player.as_ref()?.get("videoDetails")
    }

    fn microformat(&self) -> Option<&Value> {
        self.player
            .as_ref()?
            .pointer("/microformat/playerMicroformatRenderer")
    }
}

/// Extracts one field from the embedded watch page data.
type DataStrategy<T> = fn(&WatchData) -> Option<T>;

fn first_value<T>(field: &str, strategies: &[DataStrategy<T>], data: &WatchData) -> Option<T> {
    strategies.iter().enumerate().find_map(|(idx, strategy)| {
        let value = strategy(data)?;
        tracing::trace!(field, strategy = idx, "data strategy matched");
        Some(value)
    })
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn string_at(value: &Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().and_then(non_empty)
}

/// Text of a `{simpleText}` or `{runs: [{text}]}` object.
fn formatted_text(value: &Value) -> Option<String> {
    if let Some(text) = value.get("simpleText").and_then(Value::as_str) {
        return non_empty(text);
    }
    let text: String = value
        .get("runs")?
        .as_array()?
        .iter()
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect();
    non_empty(&text)
}

// =============================================================================
// Field strategies
// =============================================================================

fn primary_title(data: &WatchData) -> Option<String> {
    data.renderer(PRIMARY_INFO)?.get("title").and_then(formatted_text)
}

fn details_title(data: &WatchData) -> Option<String> {
    string_at(data.video_details()?, "title")
}

const TITLE_STRATEGIES: &[DataStrategy<String>] = &[primary_title, details_title];

fn owner_channel(data: &WatchData) -> Option<String> {
    data.renderer(SECONDARY_INFO)?
        .pointer("/owner/videoOwnerRenderer/title")
        .and_then(formatted_text)
}

fn details_channel(data: &WatchData) -> Option<String> {
    string_at(data.video_details()?, "author")
}

fn microformat_channel(data: &WatchData) -> Option<String> {
    string_at(data.microformat()?, "ownerChannelName")
}

const CHANNEL_STRATEGIES: &[DataStrategy<String>] =
    &[owner_channel, details_channel, microformat_channel];

fn attributed_description(data: &WatchData) -> Option<String> {
    data.renderer(SECONDARY_INFO)?
        .pointer("/attributedDescription/content")?
        .as_str()
        .and_then(non_empty)
}

fn details_description(data: &WatchData) -> Option<String> {
    string_at(data.video_details()?, "shortDescription")
}

const DESCRIPTION_STRATEGIES: &[DataStrategy<String>] =
    &[attributed_description, details_description];

fn primary_views(data: &WatchData) -> Option<String> {
    data.renderer(PRIMARY_INFO)?
        .pointer("/viewCount/videoViewCountRenderer/viewCount")
        .and_then(formatted_text)
}

fn details_views(data: &WatchData) -> Option<String> {
    string_at(data.video_details()?, "viewCount")
}

const VIEW_STRATEGIES: &[DataStrategy<String>] = &[primary_views, details_views];

fn microformat_date(data: &WatchData) -> Option<String> {
    let microformat = data.microformat()?;
    string_at(microformat, "publishDate").or_else(|| string_at(microformat, "uploadDate"))
}

fn primary_date(data: &WatchData) -> Option<String> {
    data.renderer(PRIMARY_INFO)?.get("dateText").and_then(formatted_text)
}

const DATE_STRATEGIES: &[DataStrategy<String>] = &[microformat_date, primary_date];

fn like_buttons(data: &WatchData) -> impl Iterator<Item = &Value> {
    data.renderer(PRIMARY_INFO)
        .and_then(|primary| primary.pointer("/videoActions/menuRenderer/topLevelButtons"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn like_count_in(label: &str) -> Option<String> {
    let caps = LIKE_COUNT_LABEL.captures(label)?;
    caps.get(1).or_else(|| caps.get(2)).and_then(|m| non_empty(m.as_str()))
}

fn accessibility_likes(data: &WatchData) -> Option<String> {
    like_buttons(data).find_map(|button| {
        let label = button
            .pointer(
                "/segmentedLikeDislikeButtonRenderer/likeButton/toggleButtonRenderer/defaultText/accessibility/accessibilityData/label",
            )?
            .as_str()?;
        like_count_in(label)
    })
}

fn view_model_likes(data: &WatchData) -> Option<String> {
    like_buttons(data).find_map(|button| {
        let view = button.pointer(
            "/segmentedLikeDislikeButtonViewModel/likeButtonViewModel/likeButtonViewModel/toggleButtonViewModel/toggleButtonViewModel/defaultButtonViewModel/buttonViewModel",
        )?;
        string_at(view, "title")
            .filter(|title| title.starts_with(|c: char| c.is_ascii_digit()))
            .or_else(|| view.get("accessibilityText").and_then(Value::as_str).and_then(like_count_in))
    })
}

const LIKE_STRATEGIES: &[DataStrategy<String>] = &[accessibility_likes, view_model_likes];

/// Video ids are 11 characters of the URL-safe base64 alphabet.
fn is_video_id(id: &str) -> bool {
    id.len() == 11
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn details_video_id(data: &WatchData) -> Option<String> {
    string_at(data.video_details()?, "videoId")
}

fn endpoint_video_id(data: &WatchData) -> Option<String> {
    data.initial
        .as_ref()?
        .pointer("/currentVideoEndpoint/watchEndpoint/videoId")?
        .as_str()
        .and_then(non_empty)
}

const VIDEO_ID_STRATEGIES: &[DataStrategy<String>] = &[details_video_id, endpoint_video_id];

/// Video id named by a watch, short, embed or live URL.
///
/// # Examples
/// ```
/// use shieldscrape::extractor::youtube::video_id_from_url;
/// use url::Url;
///
/// let url = Url::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42")?;
/// assert_eq!(video_id_from_url(&url).as_deref(), Some("dQw4w9WgXcQ"));
/// let url = Url::parse("https://youtu.be/dQw4w9WgXcQ")?;
/// assert_eq!(video_id_from_url(&url).as_deref(), Some("dQw4w9WgXcQ"));
/// # Ok::<(), url::ParseError>(())
/// ```
#[must_use]
pub fn video_id_from_url(url: &Url) -> Option<String> {
    if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "v") {
        return is_video_id(&id).then(|| id.into_owned());
    }

    let mut segments = url.path_segments()?;
    let first = segments.next()?;
    let candidate = if url.host_str() == Some("youtu.be") {
        first
    } else if matches!(first, "embed" | "shorts" | "live" | "v") {
        segments.next()?
    } else {
        return None;
    };
    is_video_id(candidate).then(|| candidate.to_string())
}

// =============================================================================
// Description links
// =============================================================================

/// Resolve a description run URL: relative paths get the YouTube origin and
/// `/redirect?q=` wrappers are unwrapped to their target.
fn resolve_run_url(raw: &str, origin: &Url) -> Option<String> {
    let url = origin.join(raw).ok()?;
    let is_redirect = url.path() == "/redirect"
        && url.host_str().is_some_and(crate::url_utils::is_youtube_host);
    if is_redirect {
        let target = url
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned())?;
        return normalize_link(&target, origin);
    }
    normalize_link(url.as_str(), origin)
}

/// Slice `units` by a UTF-16 offset and length, the units run indices count in.
fn utf16_slice(units: &[u16], start: usize, length: usize) -> Option<String> {
    let end = start.checked_add(length)?;
    units.get(start..end).map(String::from_utf16_lossy)
}

fn index_at(run: &Value, key: &str) -> usize {
    run.get(key)
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

fn description_links(data: &WatchData) -> Vec<DescriptionLink> {
    let Some(description) = data
        .renderer(SECONDARY_INFO)
        .and_then(|secondary| secondary.get("attributedDescription"))
    else {
        return Vec::new();
    };
    let Ok(origin) = Url::parse(YOUTUBE_ORIGIN) else {
        return Vec::new();
    };

    let content = description.get("content").and_then(Value::as_str).unwrap_or_default();
    let units: Vec<u16> = content.encode_utf16().collect();

    description
        .get("commandRuns")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|run| {
            let command = run.pointer("/onTap/innertubeCommand")?;
            let raw = command
                .pointer("/urlEndpoint/url")
                .or_else(|| command.pointer("/commandMetadata/webCommandMetadata/url"))?
                .as_str()?;
            let url = resolve_run_url(raw, &origin)?;
            let text = utf16_slice(&units, index_at(run, "startIndex"), index_at(run, "length"))
                .and_then(|t| non_empty(&t))
                .unwrap_or_else(|| url.clone());
            Some(DescriptionLink { text, url })
        })
        .collect()
}

// =============================================================================
// Video assembly
// =============================================================================

/// A parsed video plus what the strategies reported.
struct VideoParse {
    video: YouTubeVideo,
    warnings: Vec<String>,
}

fn parse_page(page: &Page<'_>, source: &str) -> VideoParse {
    let mut warnings = Vec::new();
    let data = WatchData::read(page.doc);
    if data.is_empty() {
        warnings.push("youtube: no embedded video data found".to_string());
    }
    let mut missing = |field: &str| warnings.push(format!("youtube: no {field} found"));

    let video_id = video_id_from_url(page.url)
        .or_else(|| first_value("video id", VIDEO_ID_STRATEGIES, &data).filter(|id| is_video_id(id)));
    if video_id.is_none() {
        missing("video id");
    }

    let title = first_value("title", TITLE_STRATEGIES, &data);
    if title.is_none() {
        missing("title");
    }

    let channel = first_value("channel", CHANNEL_STRATEGIES, &data);
    if channel.is_none() {
        missing("channel");
    }

    let video = YouTubeVideo {
        video_id,
        title,
        channel,
        description: first_value("description", DESCRIPTION_STRATEGIES, &data).unwrap_or_default(),
        description_links: description_links(&data),
        view_count: first_value("view count", VIEW_STRATEGIES, &data),
        like_count: first_value("like count", LIKE_STRATEGIES, &data),
        upload_date: first_value("upload date", DATE_STRATEGIES, &data).map(|d| normalize_date(&d)),
        url: source.to_string(),
    };

    VideoParse { video, warnings }
}

/// Parse a YouTube watch page into video metadata.
#[must_use]
pub fn parse_video(html: &str, url: &Url) -> YouTubeVideo {
    let doc = dom::parse(html);
    let page = Page::new(&doc, url);
    parse_page(&page, url.as_str()).video
}

/// Extract a YouTube watch page into a flattened [`ExtractedDocument`].
#[must_use]
pub fn extract_youtube(html: &str, url: &Url) -> ExtractedDocument {
    let doc = dom::parse(html);
    let page = Page::new(&doc, url);
    extract_page(&page, url.as_str(), &Options::default()).document
}

/// `1,234,567 views · 12K likes`
fn stats_line(video: &YouTubeVideo) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(views) = &video.view_count {
        parts.push(views.clone());
    }
    if let Some(likes) = &video.like_count {
        parts.push(format!("{likes} likes"));
    }
    parts.join(" · ")
}

fn links_section(links: &[DescriptionLink], options: &Options) -> String {
    if links.is_empty() {
        return String::new();
    }
    let items = links
        .iter()
        .map(|link| {
            let text = markdown::escape_markdown(&link.text);
            if options.markdown_links {
                format!("- [{text}]({})", link.url)
            } else {
                format!("- {text}: {}", link.url)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("## Links\n\n{items}")
}

pub(crate) fn extract_page(page: &Page<'_>, source: &str, options: &Options) -> Parsed {
    let metadata = extract_metadata(page, options);
    let VideoParse { video, warnings } = parse_page(page, source);

    let stats = stats_line(&video);
    let text = [stats.clone(), video.description.clone()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    let markdown = [
        markdown::escape_markdown(&stats),
        markdown::escape_markdown(&video.description),
        links_section(&video.description_links, options),
    ]
    .into_iter()
    .filter(|p| !p.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n");

    let mut links = LinkSet::new();
    for link in &video.description_links {
        links.push(link.url.clone());
    }

    let document = ExtractedDocument {
        title: video.title.or(metadata.title),
        author: video.channel,
        date: video.upload_date,
        description: metadata.description,
        language: metadata.language,
        url: source.to_string(),
        text,
        markdown,
        links: links.into_vec(),
    };

    Parsed { document, warnings }
}
