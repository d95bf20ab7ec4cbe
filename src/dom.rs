//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate so parser code reads in terms of
//! attributes, classes and text instead of node plumbing.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

use crate::patterns::WHITESPACE_NORMALIZE;

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get a trimmed, non-empty attribute value
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    get_attribute(sel, name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Check whether the `class` attribute contains `class` as a whole token.
#[must_use]
pub fn has_class(sel: &Selection, class: &str) -> bool {
    sel.attr("class")
        .is_some_and(|c| c.split_whitespace().any(|token| token == class))
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Get tag name of a node (lowercase)
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if node.is_element() {
        node.node_name().map(|t| t.to_ascii_lowercase())
    } else {
        None
    }
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn clean_text(s: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        return String::new();
    }
    WHITESPACE_NORMALIZE.replace_all(s, " ").trim().to_string()
}

/// Whitespace-normalized text of a selection, `None` when empty.
#[must_use]
pub fn clean_text_of(sel: &Selection) -> Option<String> {
    let text = clean_text(&text_content(sel));
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// === Tree Navigation ===

/// First node of a selection as its own selection.
#[must_use]
pub fn first<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().first().map(|node| Selection::from(*node))
}

/// First descendant of `root` matching a CSS selector.
#[must_use]
pub fn select_first<'a>(root: &Selection<'a>, css: &str) -> Option<Selection<'a>> {
    first(&root.select(css))
}

/// First element in the document matching a CSS selector.
#[must_use]
pub fn select_first_in<'a>(doc: &'a Document, css: &str) -> Option<Selection<'a>> {
    first(&doc.select(css))
}

/// Nearest ancestor (excluding the node itself) satisfying `pred`.
#[must_use]
pub fn closest_ancestor<'a>(
    node: &NodeRef<'a>,
    pred: impl Fn(&Selection<'a>) -> bool,
) -> Option<NodeRef<'a>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.is_element() && pred(&Selection::from(parent)) {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

/// Number of ancestors of `node` satisfying `pred`.
#[must_use]
pub fn count_ancestors<'a>(node: &NodeRef<'a>, pred: impl Fn(&Selection<'a>) -> bool) -> usize {
    let mut count = 0;
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.is_element() && pred(&Selection::from(parent)) {
            count += 1;
        }
        current = parent.parent();
    }
    count
}

/// Remove every element matching a CSS selector from the document.
pub fn remove_all(doc: &Document, css: &str) {
    doc.select(css).remove();
}
