//! Generic Extractor
//!
//! Boilerplate-removal extraction for arbitrary pages:
//!
//! 1. metadata is read from the untouched document
//! 2. non-content tags and boilerplate elements are removed
//! 3. a content block is chosen: the largest semantic container holding a
//!    significant share of the body text, else the best scoring element of
//!    a paragraph density pass, else `<body>`
//! 4. the block is rendered into text, Markdown and links

use std::collections::HashMap;

use dom_query::{Document, NodeId, NodeRef, Selection};
use url::Url;

use super::Parsed;
use crate::document::Document as ExtractedDocument;
use crate::dom;
use crate::link_density::{is_link_dense, link_density, text_length};
use crate::metadata::extract_metadata;
use crate::patterns::{NON_CONTENT_SELECTOR, PARAGRAPH_SELECTOR, SEMANTIC_CONTENT_SELECTOR};
use crate::render::Renderer;
use crate::selector::{boilerplate, query_all, Page};
use crate::Options;

/// Share of body text a semantic container must hold to be chosen.
const SEMANTIC_MIN_SHARE: f64 = 0.4;

/// Containers pruned under `favor_precision` when link-dense.
const PRECISION_PRUNE_SELECTOR: &str = "div, section, ul, ol, table";

/// Parts of lists, tables and quotes. A content block never starts inside one.
const STRUCTURAL_TAGS: &[&str] = &[
    "li", "ul", "ol", "dl", "dt", "dd", "tr", "td", "th", "thead", "tbody", "tfoot", "table",
    "blockquote",
];

/// Remove non-content tags and boilerplate elements.
fn clean(doc: &Document) {
    dom::remove_all(doc, NON_CONTENT_SELECTOR);

    let body = doc.select("body");
    let discarded = query_all(&body, boilerplate::is_boilerplate);
    tracing::trace!(count = discarded.len(), "removing boilerplate elements");
    for sel in discarded {
        sel.remove();
    }
}

/// Largest semantic container holding a significant share of body text.
fn semantic_block<'a>(doc: &'a Document, body_length: usize) -> Option<Selection<'a>> {
    let mut best: Option<(usize, Selection<'a>)> = None;
    for node in doc.select(SEMANTIC_CONTENT_SELECTOR).nodes() {
        let sel = Selection::from(*node);
        let length = text_length(&sel);
        if best.as_ref().is_none_or(|(best_length, _)| length > *best_length) {
            best = Some((length, sel));
        }
    }

    best.filter(|(length, _)| *length as f64 >= body_length as f64 * SEMANTIC_MIN_SHARE)
        .map(|(_, sel)| sel)
}

/// Candidate scores in first-scored order, indexed by node.
#[derive(Default)]
struct Scores<'a> {
    index: HashMap<NodeId, usize>,
    totals: Vec<(NodeRef<'a>, f64)>,
}

impl<'a> Scores<'a> {
    fn add(&mut self, node: NodeRef<'a>, score: f64) {
        if !node.is_element() || dom::node_tag(&node).as_deref() == Some("html") {
            return;
        }
        match self.index.get(&node.id) {
            Some(&idx) => self.totals[idx].1 += score,
            None => {
                self.index.insert(node.id, self.totals.len());
                self.totals.push((node, score));
            }
        }
    }
}

/// Climb from a list, table or quote part to the element that contains it.
fn promote(node: NodeRef<'_>) -> NodeRef<'_> {
    let mut current = node;
    while dom::node_tag(&current).is_some_and(|tag| STRUCTURAL_TAGS.contains(&tag.as_str())) {
        match current.parent() {
            Some(parent)
                if parent.is_element() && dom::node_tag(&parent).as_deref() != Some("html") =>
            {
                current = parent;
            }
            _ => break,
        }
    }
    current
}

/// Element whose paragraph children carry the most link-discounted text.
///
/// Each paragraph-like element adds its text length, discounted by its link
/// density, to its parent and half of that to its grandparent. Totals are
/// then scaled by the candidate's own link density. Ties go to the element
/// that was scored first. A winning list, table or quote is widened to its
/// container so the surrounding paragraphs and the list markers survive.
fn density_block(doc: &Document) -> Option<Selection<'_>> {
    let mut scores = Scores::default();

    for node in doc.select(PARAGRAPH_SELECTOR).nodes() {
        let sel = Selection::from(*node);
        let length = text_length(&sel);
        if length == 0 {
            continue;
        }
        let score = length as f64 * (1.0 - link_density(&sel));
        if let Some(parent) = node.parent() {
            scores.add(parent, score);
            if let Some(grandparent) = parent.parent() {
                scores.add(grandparent, score / 2.0);
            }
        }
    }

    let mut best: Option<(f64, NodeRef<'_>)> = None;
    for (node, score) in scores.totals {
        let scaled = score * (1.0 - link_density(&Selection::from(node)));
        if scaled > 0.0 && best.as_ref().is_none_or(|(top, _)| scaled > *top) {
            best = Some((scaled, node));
        }
    }
    best.map(|(_, node)| Selection::from(promote(node)))
}

fn select_block(doc: &Document) -> Option<Selection<'_>> {
    let body = dom::select_first_in(doc, "body")?;
    let body_length = text_length(&body);
    if body_length == 0 {
        return None;
    }

    if let Some(block) = semantic_block(doc, body_length) {
        tracing::debug!(pass = "semantic", tag = ?dom::tag_name(&block), "content block selected");
        return Some(block);
    }
    if let Some(block) = density_block(doc) {
        tracing::debug!(pass = "density", tag = ?dom::tag_name(&block), "content block selected");
        return Some(block);
    }
    tracing::debug!(pass = "body", "content block selected");
    Some(body)
}

/// Drop link-dense lists and containers from inside the chosen block.
fn prune_link_dense(block: &Selection<'_>, options: &Options) {
    for node in block.select(PRECISION_PRUNE_SELECTOR).nodes() {
        let sel = Selection::from(*node);
        if is_link_dense(&sel, options) {
            sel.remove();
        }
    }
}

pub(crate) fn extract_page(page: &Page<'_>, source: &str, options: &Options) -> Parsed {
    let mut warnings = Vec::new();

    let metadata = extract_metadata(page, options);
    if metadata.title.is_none() {
        warnings.push("generic: no title found".to_string());
    }

    clean(page.doc);

    let mut renderer = Renderer::new(page.url, options);
    let rendered = match select_block(page.doc) {
        Some(block) => {
            if options.favor_precision {
                prune_link_dense(&block, options);
            }
            renderer.render(&block)
        }
        None => Default::default(),
    };
    if rendered.text.is_empty() {
        warnings.push("generic: no content block found".to_string());
    }

    let document = ExtractedDocument {
        title: metadata.title,
        author: metadata.author,
        date: metadata.date,
        description: metadata.description,
        language: metadata.language,
        url: source.to_string(),
        text: rendered.text,
        markdown: rendered.markdown,
        links: renderer.into_links(),
    };

    Parsed { document, warnings }
}

/// Extract the main content of an arbitrary page.
#[must_use]
pub fn extract_generic(html: &str, url: &Url) -> ExtractedDocument {
    let doc = dom::parse(html);
    let page = Page::new(&doc, url);
    extract_page(&page, url.as_str(), &Options::default()).document
}
