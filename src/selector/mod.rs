//! Selector Infrastructure
//!
//! Two kinds of selector logic live here:
//!
//! - **Rules** test a single element (`fn(&Selection) -> bool`) and are used
//!   for boilerplate detection during cleaning.
//! - **Strategies** look for one field of a page (`fn(&Page) -> Option<T>`).
//!   A field is described by an ordered slice of strategies, tried in turn
//!   until one yields a value. Markup variants of the same site are handled
//!   by adding a strategy, not by branching inside one.

use dom_query::{Document, Selection};
use url::Url;

pub mod boilerplate;

/// A selector rule that tests if a selection matches certain criteria
pub type Rule = fn(&Selection) -> bool;

/// A parsed page together with its source URL.
#[derive(Clone, Copy)]
pub struct Page<'a> {
    pub doc: &'a Document,
    pub url: &'a Url,
}

impl<'a> Page<'a> {
    #[must_use]
    pub const fn new(doc: &'a Document, url: &'a Url) -> Self {
        Self { doc, url }
    }
}

/// Extracts one owned field value from a page.
pub type Strategy<T> = fn(&Page<'_>) -> Option<T>;

/// Locates one element of a page, such as a post body.
pub type NodeStrategy = for<'a> fn(&Page<'a>) -> Option<Selection<'a>>;

/// Extracts one owned field value from an element, such as a comment.
pub type ElementStrategy<T> = fn(&Selection<'_>) -> Option<T>;

/// Locates a descendant of an element, such as a comment body.
pub type ElementNodeStrategy = for<'a> fn(&Selection<'a>) -> Option<Selection<'a>>;

/// Run `strategies` in order and return the first value produced.
///
/// `field` only labels the trace event for the strategy that matched.
pub fn first_match<T>(field: &str, strategies: &[Strategy<T>], page: &Page<'_>) -> Option<T> {
    strategies.iter().enumerate().find_map(|(idx, strategy)| {
        let value = strategy(page)?;
        tracing::trace!(field, strategy = idx, "selector strategy matched");
        Some(value)
    })
}

/// Run node `strategies` in order and return the first element located.
pub fn first_node<'a>(
    field: &str,
    strategies: &[NodeStrategy],
    page: &Page<'a>,
) -> Option<Selection<'a>> {
    strategies.iter().enumerate().find_map(|(idx, strategy)| {
        let node = strategy(page)?;
        tracing::trace!(field, strategy = idx, "selector strategy matched");
        Some(node)
    })
}

/// Run element `strategies` in order and return the first value produced.
pub fn first_element_match<T>(
    field: &str,
    strategies: &[ElementStrategy<T>],
    element: &Selection<'_>,
) -> Option<T> {
    strategies.iter().enumerate().find_map(|(idx, strategy)| {
        let value = strategy(element)?;
        tracing::trace!(field, strategy = idx, "element strategy matched");
        Some(value)
    })
}

/// Run element node `strategies` in order and return the first element located.
pub fn first_element_node<'a>(
    field: &str,
    strategies: &[ElementNodeStrategy],
    element: &Selection<'a>,
) -> Option<Selection<'a>> {
    strategies.iter().enumerate().find_map(|(idx, strategy)| {
        let node = strategy(element)?;
        tracing::trace!(field, strategy = idx, "element strategy matched");
        Some(node)
    })
}

/// Query for all elements under `root` matching the rule, in document order.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}
