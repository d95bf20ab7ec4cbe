//! Boilerplate Rules
//!
//! Identifies navigation, advertising, sharing widgets, sidebars and hidden
//! elements by their class, id, role and inline style. Matching elements are
//! removed by the generic extractor before block selection.

use dom_query::Selection;

use crate::dom;
use crate::patterns::{ADVERTISEMENT_CLASS, BOILERPLATE_CLASS, NAVIGATION_CLASS};

/// Tags the class/id rule applies to. Semantic containers and inline text
/// are never discarded on naming alone.
const DISCARDABLE_TAGS: &[&str] = &[
    "div", "section", "aside", "header", "ul", "ol", "li", "dl", "span", "p", "table", "figure",
];

/// Descendants that mark an element as a content wrapper.
const CONTENT_MARKERS: &str = "article, main, [role='main'], [itemprop='articleBody']";

/// Check whether a single class or id token names boilerplate.
#[must_use]
pub fn is_boilerplate_name(token: &str) -> bool {
    NAVIGATION_CLASS.is_match(token)
        || BOILERPLATE_CLASS.is_match(token)
        || token
            .split(['-', '_'])
            .any(|part| ADVERTISEMENT_CLASS.is_match(part))
}

/// Element is hidden through inline style or ARIA.
#[must_use]
pub fn is_hidden(sel: &Selection) -> bool {
    if sel.has_attr("hidden") {
        return true;
    }
    if sel.attr("aria-hidden").is_some_and(|v| v.trim() == "true") {
        return true;
    }
    sel.attr("style").is_some_and(|style| {
        let style = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        style.contains("display:none") || style.contains("visibility:hidden")
    })
}

/// Rule: element is navigation, advertising or another boilerplate block.
#[must_use]
pub fn is_boilerplate(sel: &Selection) -> bool {
    if is_hidden(sel) {
        return true;
    }

    if let Some(role) = sel.attr("role") {
        if matches!(
            role.trim().to_ascii_lowercase().as_str(),
            "navigation" | "banner" | "contentinfo" | "complementary" | "menu" | "menubar"
        ) {
            return true;
        }
    }

    let Some(tag) = dom::tag_name(sel) else {
        return false;
    };
    if !DISCARDABLE_TAGS.contains(&tag.as_str()) {
        return false;
    }

    let names_boilerplate = ["class", "id"].iter().any(|attr| {
        sel.attr(attr)
            .is_some_and(|value| value.split_whitespace().any(is_boilerplate_name))
    });

    names_boilerplate && !sel.select(CONTENT_MARKERS).exists()
}
