//! Reddit Structural Parser
//!
//! Reads a Reddit thread page into a [`RedditThread`]: post metadata, the
//! post body and the comment forest. Three markup generations are handled
//! by ordered strategies per field:
//!
//! - old layout (`old.reddit.com`): `div.thing.link`, `div.commentarea`
//! - current layout: `shreddit-post` and `shreddit-comment` custom elements
//! - 2018 redesign: `data-testid` attributes and `div.Comment`, or bare
//!   `[data-testid='comment']` elements when no `div.Comment` wraps them
//!
//! Each field ends with a generic heuristic (a `<time>` outside the comment
//! area, the `/r/<name>` URL segment, the page `<title>`).

#![allow(clippy::cast_possible_truncation)]

use dom_query::{Document, Selection};
use url::Url;

use super::forest::{build_forest, FlatComment};
use super::Parsed;
use crate::document::{Document as ExtractedDocument, RedditComment, RedditThread};
use crate::dom;
use crate::markdown;
use crate::metadata::{extract_metadata, normalize_date};
use crate::patterns::{SCORE_TEXT, SUBREDDIT_PATH, SUBREDDIT_TITLE_SUFFIX};
use crate::render::Renderer;
use crate::selector::{
    first_element_match, first_element_node, first_match, first_node, ElementNodeStrategy,
    ElementStrategy, NodeStrategy, Page, Strategy,
};
use crate::Options;

/// Elements that mark a page as a thread with a title.
const TITLE_MARKERS: &str =
    "title, h1, a.title, shreddit-post[post-title], [data-testid='post-title']";

/// Elements that mark a page as carrying a comment section.
pub const COMMENT_MARKERS: &str = "div.commentarea, div.comment, shreddit-comment, shreddit-comment-tree, [data-testid='comment'], div.Comment";

/// Comment section wrappers, present even when a thread has no comments yet.
const COMMENT_CONTAINERS: &str = "div.commentarea, shreddit-comment-tree, #comment-tree";

const DELETED_MARKERS: [&str; 2] = ["[deleted]", "[removed]"];

/// Check whether a document has thread title and comment markers.
#[must_use]
pub fn looks_like_thread(doc: &Document) -> bool {
    doc.select(TITLE_MARKERS).exists() && doc.select(COMMENT_MARKERS).exists()
}

// =============================================================================
// Element classification
// =============================================================================

/// Rule: element is one comment (not a comment body or a comment list).
#[must_use]
pub fn is_comment_element(sel: &Selection) -> bool {
    match dom::tag_name(sel).as_deref() {
        Some("shreddit-comment") => true,
        Some("div" | "article")
            if dom::has_class(sel, "comment") || dom::has_class(sel, "Comment") =>
        {
            true
        }
        _ => is_testid_comment(sel),
    }
}

/// `[data-testid='comment']` is a whole comment unless a `div.Comment`
/// wraps it, in which case it is that comment's body.
fn is_testid_comment(sel: &Selection) -> bool {
    if sel.attr("data-testid").as_deref() != Some("comment") {
        return false;
    }
    sel.nodes().first().is_some_and(|node| {
        dom::closest_ancestor(node, |s| dom::has_class(s, "Comment")).is_none()
    })
}

/// Comment area, sidebar or a comment: regions the post fields never read.
fn is_thread_chrome(sel: &Selection) -> bool {
    is_comment_element(sel) || dom::has_class(sel, "commentarea") || dom::has_class(sel, "side")
}

/// First match of `css` that does not sit inside a comment or the sidebar.
fn first_outside_comments<'a>(doc: &'a Document, css: &str) -> Option<Selection<'a>> {
    doc.select(css)
        .nodes()
        .iter()
        .find(|node| dom::closest_ancestor(node, is_thread_chrome).is_none())
        .map(|node| Selection::from(*node))
}

/// First match of `css` under `comment` that belongs to the comment itself
/// rather than to one of its nested replies.
fn own_first<'a>(comment: &Selection<'a>, css: &str) -> Option<Selection<'a>> {
    let own_id = comment.nodes().first()?.id;
    comment
        .select(css)
        .nodes()
        .iter()
        .find(|node| {
            dom::closest_ancestor(node, is_comment_element).is_some_and(|owner| owner.id == own_id)
        })
        .map(|node| Selection::from(*node))
}

fn text_of(sel: Option<Selection<'_>>) -> Option<String> {
    sel.and_then(|s| dom::clean_text_of(&s))
}

fn attr_of(sel: Option<Selection<'_>>, name: &str) -> Option<String> {
    sel.and_then(|s| dom::non_empty_attribute(&s, name))
}

// =============================================================================
// Value parsing
// =============================================================================

/// Parse a displayed vote score.
///
/// Accepts `1,234`, `-3`, `1.2k`, `2m` and `12 points`. Hidden scores
/// (`•`) and anything else unparseable give `None`.
#[must_use]
pub fn parse_score(raw: &str) -> Option<i64> {
    let caps = SCORE_TEXT.captures(raw)?;
    let number: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
    let multiplier = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(suffix) if suffix == "k" => 1_000.0,
        Some(suffix) if suffix == "m" => 1_000_000.0,
        _ => 1.0,
    };
    Some((number * multiplier).round() as i64)
}

/// How an author field reads once the `u/` prefix is removed.
#[derive(Debug, PartialEq, Eq)]
enum AuthorName {
    Named(String),
    Deleted,
    Blank,
}

fn clean_author(raw: &str) -> AuthorName {
    let name = raw.trim();
    if DELETED_MARKERS.contains(&name) {
        return AuthorName::Deleted;
    }
    let name = name
        .strip_prefix("/u/")
        .or_else(|| name.strip_prefix("u/"))
        .unwrap_or(name)
        .trim();
    if name.is_empty() {
        AuthorName::Blank
    } else {
        AuthorName::Named(name.to_string())
    }
}

fn clean_subreddit(raw: &str) -> Option<String> {
    let name = raw.trim();
    let name = name
        .strip_prefix("/r/")
        .or_else(|| name.strip_prefix("r/"))
        .unwrap_or(name)
        .trim_matches('/');
    (!name.is_empty()).then(|| name.to_string())
}

// =============================================================================
// Post strategies
// =============================================================================

fn old_title(page: &Page<'_>) -> Option<String> {
    text_of(dom::select_first_in(page.doc, "div.thing.link a.title, p.title a.title"))
}

fn shreddit_title_attr(page: &Page<'_>) -> Option<String> {
    attr_of(dom::select_first_in(page.doc, "shreddit-post[post-title]"), "post-title")
        .map(|t| dom::clean_text(&t))
}

fn shreddit_title_heading(page: &Page<'_>) -> Option<String> {
    text_of(dom::select_first_in(page.doc, "shreddit-post h1, [slot='title']"))
}

fn redesign_title(page: &Page<'_>) -> Option<String> {
    text_of(dom::select_first_in(page.doc, "[data-testid='post-title']"))
}

fn heading_title(page: &Page<'_>) -> Option<String> {
    text_of(first_outside_comments(page.doc, "h1"))
}

fn document_title(page: &Page<'_>) -> Option<String> {
    let title = text_of(dom::select_first_in(page.doc, "title"))?;
    let title = SUBREDDIT_TITLE_SUFFIX.replace(&title, "").trim().to_string();
    (!title.is_empty()).then_some(title)
}

const TITLE_STRATEGIES: &[Strategy<String>] = &[
    old_title,
    shreddit_title_attr,
    shreddit_title_heading,
    redesign_title,
    heading_title,
    document_title,
];

fn old_author(page: &Page<'_>) -> Option<String> {
    attr_of(dom::select_first_in(page.doc, "div.thing.link[data-author]"), "data-author")
        .or_else(|| text_of(dom::select_first_in(page.doc, "div.thing.link p.tagline a.author")))
}

fn shreddit_author(page: &Page<'_>) -> Option<String> {
    attr_of(dom::select_first_in(page.doc, "shreddit-post[author]"), "author")
}

fn slot_author(page: &Page<'_>) -> Option<String> {
    text_of(first_outside_comments(page.doc, "[slot='authorName']"))
}

fn redesign_author(page: &Page<'_>) -> Option<String> {
    text_of(first_outside_comments(page.doc, "[data-testid='post_author_link']"))
}

fn user_link_author(page: &Page<'_>) -> Option<String> {
    text_of(first_outside_comments(page.doc, "a[href*='/user/'], a[href*='/u/']"))
}

const AUTHOR_STRATEGIES: &[Strategy<String>] = &[
    old_author,
    shreddit_author,
    slot_author,
    redesign_author,
    user_link_author,
];

fn old_subreddit(page: &Page<'_>) -> Option<String> {
    attr_of(dom::select_first_in(page.doc, "div.thing.link[data-subreddit]"), "data-subreddit")
        .or_else(|| text_of(dom::select_first_in(page.doc, ".redditname a")))
}

fn shreddit_subreddit(page: &Page<'_>) -> Option<String> {
    attr_of(
        dom::select_first_in(page.doc, "shreddit-post[subreddit-prefixed-name]"),
        "subreddit-prefixed-name",
    )
}

fn redesign_subreddit(page: &Page<'_>) -> Option<String> {
    text_of(dom::select_first_in(page.doc, "[data-testid='subreddit-name']"))
}

fn url_subreddit(page: &Page<'_>) -> Option<String> {
    SUBREDDIT_PATH
        .captures(page.url.path())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

const SUBREDDIT_STRATEGIES: &[Strategy<String>] = &[
    old_subreddit,
    shreddit_subreddit,
    redesign_subreddit,
    url_subreddit,
];

fn old_score(page: &Page<'_>) -> Option<i64> {
    let score = dom::select_first_in(page.doc, "div.thing.link div.score.unvoted")?;
    dom::non_empty_attribute(&score, "title")
        .and_then(|t| parse_score(&t))
        .or_else(|| dom::clean_text_of(&score).and_then(|t| parse_score(&t)))
}

fn shreddit_score(page: &Page<'_>) -> Option<i64> {
    attr_of(dom::select_first_in(page.doc, "shreddit-post[score]"), "score")
        .and_then(|s| parse_score(&s))
}

fn redesign_score(page: &Page<'_>) -> Option<i64> {
    text_of(dom::select_first_in(page.doc, "[data-testid='post-score']"))
        .and_then(|s| parse_score(&s))
}

fn data_score(page: &Page<'_>) -> Option<i64> {
    attr_of(dom::select_first_in(page.doc, "div.thing.link[data-score]"), "data-score")
        .and_then(|s| parse_score(&s))
}

const SCORE_STRATEGIES: &[Strategy<i64>] = &[old_score, shreddit_score, redesign_score, data_score];

fn old_date(page: &Page<'_>) -> Option<String> {
    attr_of(
        dom::select_first_in(page.doc, "div.thing.link p.tagline time[datetime]"),
        "datetime",
    )
}

fn shreddit_date(page: &Page<'_>) -> Option<String> {
    attr_of(
        dom::select_first_in(page.doc, "shreddit-post[created-timestamp]"),
        "created-timestamp",
    )
}

fn redesign_date(page: &Page<'_>) -> Option<String> {
    text_of(dom::select_first_in(page.doc, "[data-testid='post_timestamp']"))
}

fn time_element_date(page: &Page<'_>) -> Option<String> {
    attr_of(first_outside_comments(page.doc, "time[datetime]"), "datetime")
}

const DATE_STRATEGIES: &[Strategy<String>] =
    &[old_date, shreddit_date, redesign_date, time_element_date];

fn old_body<'a>(page: &Page<'a>) -> Option<Selection<'a>> {
    dom::select_first_in(page.doc, "div.thing.link div.expando div.md")
}

fn shreddit_body<'a>(page: &Page<'a>) -> Option<Selection<'a>> {
    dom::select_first_in(page.doc, "shreddit-post [slot='text-body'], [slot='text-body']")
}

fn redesign_body<'a>(page: &Page<'a>) -> Option<Selection<'a>> {
    dom::select_first_in(page.doc, "[data-test-id='post-content'] [data-click-id='text']")
}

fn markdown_div_body<'a>(page: &Page<'a>) -> Option<Selection<'a>> {
    first_outside_comments(page.doc, "div.md")
}

const BODY_STRATEGIES: &[NodeStrategy] = &[old_body, shreddit_body, redesign_body, markdown_div_body];

fn old_comments<'a>(page: &Page<'a>) -> Option<Selection<'a>> {
    non_empty(page.doc.select("div.commentarea div.thing.comment"))
}

fn shreddit_comments<'a>(page: &Page<'a>) -> Option<Selection<'a>> {
    non_empty(page.doc.select("shreddit-comment"))
}

fn redesign_comments<'a>(page: &Page<'a>) -> Option<Selection<'a>> {
    non_empty(page.doc.select("div.Comment"))
}

fn testid_comments<'a>(page: &Page<'a>) -> Option<Selection<'a>> {
    let nodes: Vec<_> = page
        .doc
        .select("[data-testid='comment']")
        .nodes()
        .iter()
        .filter(|node| is_testid_comment(&Selection::from(**node)))
        .copied()
        .collect();
    (!nodes.is_empty()).then(|| Selection::from(nodes))
}

fn class_comments<'a>(page: &Page<'a>) -> Option<Selection<'a>> {
    non_empty(page.doc.select("div.comment, article.comment"))
}

fn non_empty(sel: Selection<'_>) -> Option<Selection<'_>> {
    sel.exists().then_some(sel)
}

const COMMENT_STREAM_STRATEGIES: &[NodeStrategy] = &[
    old_comments,
    shreddit_comments,
    redesign_comments,
    testid_comments,
    class_comments,
];

// =============================================================================
// Comment strategies
// =============================================================================

fn attribute_author(comment: &Selection<'_>) -> Option<String> {
    dom::non_empty_attribute(comment, "author")
        .or_else(|| dom::non_empty_attribute(comment, "data-author"))
}

fn link_author(comment: &Selection<'_>) -> Option<String> {
    text_of(own_first(
        comment,
        "a.author, [data-testid='comment_author_link'], a[href*='/user/']",
    ))
}

const COMMENT_AUTHOR_STRATEGIES: &[ElementStrategy<String>] = &[attribute_author, link_author];

fn attribute_score(comment: &Selection<'_>) -> Option<i64> {
    dom::non_empty_attribute(comment, "score").and_then(|s| parse_score(&s))
}

/// Score shown by an element: exact `title` tooltip first, then its text.
fn displayed_score(score: &Selection<'_>) -> Option<i64> {
    dom::non_empty_attribute(score, "title")
        .and_then(|t| parse_score(&t))
        .or_else(|| dom::clean_text_of(score).and_then(|t| parse_score(&t)))
}

fn tagline_score(comment: &Selection<'_>) -> Option<i64> {
    displayed_score(&own_first(comment, "span.score.unvoted")?)
}

fn span_score(comment: &Selection<'_>) -> Option<i64> {
    displayed_score(&own_first(comment, "span.score")?)
}

fn slot_score(comment: &Selection<'_>) -> Option<i64> {
    displayed_score(&own_first(comment, "[slot='score']")?)
}

fn testid_score(comment: &Selection<'_>) -> Option<i64> {
    displayed_score(&own_first(comment, "[data-testid='vote-score']")?)
}

const COMMENT_SCORE_STRATEGIES: &[ElementStrategy<i64>] =
    &[attribute_score, tagline_score, span_score, slot_score, testid_score];

fn time_timestamp(comment: &Selection<'_>) -> Option<String> {
    attr_of(own_first(comment, "time[datetime]"), "datetime")
}

fn timeago_timestamp(comment: &Selection<'_>) -> Option<String> {
    attr_of(own_first(comment, "faceplate-timeago[ts]"), "ts")
}

fn attribute_timestamp(comment: &Selection<'_>) -> Option<String> {
    dom::non_empty_attribute(comment, "created-timestamp")
}

fn time_title_timestamp(comment: &Selection<'_>) -> Option<String> {
    attr_of(own_first(comment, "time[title]"), "title")
}

fn slot_timestamp(comment: &Selection<'_>) -> Option<String> {
    let slot = own_first(comment, "[slot='timestamp']")?;
    ["ts", "datetime", "title"]
        .iter()
        .find_map(|name| dom::non_empty_attribute(&slot, name))
        .or_else(|| dom::clean_text_of(&slot))
}

fn time_text_timestamp(comment: &Selection<'_>) -> Option<String> {
    text_of(own_first(comment, "time"))
}

const COMMENT_TIMESTAMP_STRATEGIES: &[ElementStrategy<String>] = &[
    time_timestamp,
    timeago_timestamp,
    attribute_timestamp,
    time_title_timestamp,
    slot_timestamp,
    time_text_timestamp,
];

fn usertext_body<'a>(comment: &Selection<'a>) -> Option<Selection<'a>> {
    own_first(comment, ".usertext-body .md")
}

fn slot_body<'a>(comment: &Selection<'a>) -> Option<Selection<'a>> {
    own_first(comment, "[slot='comment']")
}

fn testid_body<'a>(comment: &Selection<'a>) -> Option<Selection<'a>> {
    own_first(comment, "[data-testid='comment']")
}

fn testid_text_body<'a>(comment: &Selection<'a>) -> Option<Selection<'a>> {
    own_first(comment, "[data-testid='comment-text']")
}

fn markdown_div<'a>(comment: &Selection<'a>) -> Option<Selection<'a>> {
    own_first(comment, "div.md")
}

/// A bare `[data-testid='comment']` element is its own body.
fn testid_self_body<'a>(comment: &Selection<'a>) -> Option<Selection<'a>> {
    is_testid_comment(comment).then(|| comment.clone())
}

const COMMENT_BODY_STRATEGIES: &[ElementNodeStrategy] = &[
    usertext_body,
    slot_body,
    testid_body,
    testid_text_body,
    markdown_div,
    testid_self_body,
];

/// Markup depth: explicit attribute, else the number of enclosing comments.
fn comment_depth(comment: &Selection<'_>) -> usize {
    ["depth", "data-depth"]
        .iter()
        .find_map(|name| {
            dom::non_empty_attribute(comment, name).and_then(|d| d.parse::<usize>().ok())
        })
        .or_else(|| {
            comment
                .nodes()
                .first()
                .map(|node| dom::count_ancestors(node, is_comment_element))
        })
        .unwrap_or(0)
}

/// Deleted comments without an author field still say so in the tagline.
fn is_marked_deleted(comment: &Selection<'_>) -> bool {
    if dom::has_class(comment, "deleted") {
        return true;
    }
    text_of(own_first(comment, "p.tagline"))
        .is_some_and(|tagline| DELETED_MARKERS.iter().any(|m| tagline.contains(m)))
}

fn read_comment(comment: &Selection<'_>, renderer: &mut Renderer<'_>) -> FlatComment {
    let raw_author = first_element_match("comment author", COMMENT_AUTHOR_STRATEGIES, comment);
    let (author, deleted) = match raw_author.as_deref().map(clean_author) {
        Some(AuthorName::Deleted) => (None, true),
        Some(AuthorName::Named(name)) => (Some(name), false),
        Some(AuthorName::Blank) | None => (None, is_marked_deleted(comment)),
    };

    let rendered = first_element_node("comment body", COMMENT_BODY_STRATEGIES, comment)
        .map(|body| renderer.render(&body))
        .unwrap_or_default();

    FlatComment {
        depth: comment_depth(comment),
        comment: RedditComment {
            author,
            deleted,
            text: rendered.text,
            markdown: rendered.markdown,
            score: first_element_match("comment score", COMMENT_SCORE_STRATEGIES, comment),
            timestamp: first_element_match("comment timestamp", COMMENT_TIMESTAMP_STRATEGIES, comment)
                .map(|t| normalize_date(&t)),
            depth: 0,
            children: Vec::new(),
        },
    }
}

// =============================================================================
// Thread assembly
// =============================================================================

/// A parsed thread plus what the renderer and strategies reported.
struct ThreadParse {
    thread: RedditThread,
    links: Vec<String>,
    warnings: Vec<String>,
}

fn parse_page(page: &Page<'_>, source: &str, options: &Options) -> ThreadParse {
    let mut warnings = Vec::new();
    let mut missing = |field: &str| warnings.push(format!("reddit: no {field} found"));

    let title = first_match("title", TITLE_STRATEGIES, page);
    if title.is_none() {
        missing("title");
    }

    let author = match first_match("author", AUTHOR_STRATEGIES, page).as_deref().map(clean_author) {
        Some(AuthorName::Named(name)) if !options.is_blacklisted_author(&name) => Some(name),
        _ => None,
    };
    if author.is_none() {
        missing("author");
    }

    let subreddit =
        first_match("subreddit", SUBREDDIT_STRATEGIES, page).and_then(|s| clean_subreddit(&s));
    if subreddit.is_none() {
        missing("subreddit");
    }

    let score = first_match("score", SCORE_STRATEGIES, page);
    if score.is_none() {
        missing("score");
    }

    let date = first_match("date", DATE_STRATEGIES, page).map(|d| normalize_date(&d));

    let mut renderer = Renderer::new(page.url, options);
    let body = first_node("body", BODY_STRATEGIES, page).map(|node| renderer.render(&node));
    if body.as_ref().is_none_or(crate::render::Rendered::is_empty) {
        missing("post body");
    }
    let body = body.unwrap_or_default();

    let mut comments = Vec::new();
    if options.include_comments {
        let stream = first_node("comments", COMMENT_STREAM_STRATEGIES, page);
        if stream.is_none() && !page.doc.select(COMMENT_CONTAINERS).exists() {
            missing("comment container");
        }
        if let Some(stream) = stream {
            let flat = stream
                .nodes()
                .iter()
                .map(|node| read_comment(&Selection::from(*node), &mut renderer))
                .collect();
            comments = build_forest(flat);
        }
    }

    ThreadParse {
        thread: RedditThread {
            title,
            author,
            subreddit,
            score,
            date,
            text: body.text,
            markdown: body.markdown,
            url: source.to_string(),
            comments,
        },
        links: renderer.into_links(),
        warnings,
    }
}

/// Parse a Reddit thread page into post fields and a comment forest.
#[must_use]
pub fn parse_thread(html: &str, url: &Url) -> RedditThread {
    let doc = dom::parse(html);
    let page = Page::new(&doc, url);
    parse_page(&page, url.as_str(), &Options::default()).thread
}

/// Extract a Reddit thread page into a flattened [`ExtractedDocument`].
#[must_use]
pub fn extract_reddit(html: &str, url: &Url) -> ExtractedDocument {
    let doc = dom::parse(html);
    let page = Page::new(&doc, url);
    extract_page(&page, url.as_str(), &Options::default()).document
}

pub(crate) fn extract_page(page: &Page<'_>, source: &str, options: &Options) -> Parsed {
    let metadata = extract_metadata(page, options);
    let parsed = parse_page(page, source, options);
    let thread = parsed.thread;

    let mut text_parts = vec![thread.text.clone()];
    let mut markdown_parts = vec![thread.markdown.clone()];
    if options.include_comments && !thread.comments.is_empty() {
        markdown_parts.push("## Comments".to_string());
        for comment in &thread.comments {
            push_comment(comment, &mut text_parts, &mut markdown_parts);
        }
    }

    let document = ExtractedDocument {
        title: thread.title,
        author: thread.author,
        date: thread.date,
        description: metadata.description,
        language: metadata.language,
        url: source.to_string(),
        text: join_nonempty(text_parts),
        markdown: join_nonempty(markdown_parts),
        links: parsed.links,
    };

    Parsed {
        document,
        warnings: parsed.warnings,
    }
}

fn join_nonempty(parts: Vec<String>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `u/name · 12 points · 2024-03-04T12:00:00Z`
fn comment_header(comment: &RedditComment) -> String {
    let mut parts = Vec::with_capacity(3);
    parts.push(match (&comment.author, comment.deleted) {
        (Some(name), _) => format!("u/{name}"),
        (None, true) => DELETED_MARKERS[0].to_string(),
        (None, false) => "[unknown]".to_string(),
    });
    if let Some(score) = comment.score {
        let unit = if score.abs() == 1 { "point" } else { "points" };
        parts.push(format!("{score} {unit}"));
    }
    if let Some(timestamp) = &comment.timestamp {
        parts.push(timestamp.clone());
    }
    parts.join(" · ")
}

/// Append a comment and its replies, depth shown as indentation in text
/// and as nested quotes in Markdown.
fn push_comment(comment: &RedditComment, text: &mut Vec<String>, md: &mut Vec<String>) {
    let header = comment_header(comment);
    let indent = "  ".repeat(comment.depth);

    let entry = std::iter::once(header.as_str())
        .chain(comment.text.lines())
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    text.push(entry);

    let bold = format!("**{}**", markdown::escape_markdown(&header));
    let entry_md = if comment.markdown.is_empty() {
        bold
    } else {
        format!("{bold}\n\n{}", comment.markdown)
    };
    md.push(markdown::blockquote(&entry_md, comment.depth + 1));

    for child in &comment.children {
        push_comment(child, text, md);
    }
}
