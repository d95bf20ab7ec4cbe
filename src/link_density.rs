//! Link Density
//!
//! Measures how much of an element's text sits inside links. The generic
//! extractor discounts link-heavy text when scoring content blocks, and with
//! `favor_precision` removes link-dense lists and divs from the chosen block.

use dom_query::Selection;

use crate::dom;
use crate::Options;

/// Number of characters of whitespace-normalized text in an element.
#[must_use]
pub fn text_length(sel: &Selection) -> usize {
    dom::clean_text(&dom::text_content(sel)).chars().count()
}

/// Collect heuristics on link text.
///
/// Returns `(total_link_length, num_short_links, num_non_empty_links)`.
fn collect_link_info(links: &Selection) -> (usize, usize, usize) {
    let mut link_length = 0;
    let mut n_short_links = 0;
    let mut n_non_empty_links = 0;

    for link in links.iter() {
        let text_length = text_length(&link);
        if text_length == 0 {
            continue;
        }

        link_length += text_length;
        if text_length < 10 {
            n_short_links += 1;
        }
        n_non_empty_links += 1;
    }

    (link_length, n_short_links, n_non_empty_links)
}

/// Share of an element's text that is link text, in `0.0..=1.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn link_density(sel: &Selection) -> f64 {
    let text_length = text_length(sel);
    if text_length == 0 {
        return 0.0;
    }
    let (link_length, _, _) = collect_link_info(&sel.select("a"));
    (link_length as f64 / text_length as f64).min(1.0)
}

/// Check whether an element is rich in links (probably boilerplate).
///
/// Short elements are judged on link share and on the share of short
/// links, which is typical of navigation menus. A lone long link that makes
/// up nearly all of the text also counts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn is_link_dense(element: &Selection, options: &Options) -> bool {
    let links = element.select("a");
    let n_links = links.length();
    if n_links == 0 {
        return false;
    }

    let text_length = text_length(element);

    if n_links == 1 {
        let threshold: usize = if options.favor_precision { 10 } else { 100 };
        let link_text_length = text_length_of_first(&links);
        if link_text_length > threshold && (link_text_length as f64) > (text_length as f64) * 0.9 {
            return true;
        }
    }

    let has_next_sibling = element
        .nodes()
        .first()
        .and_then(dom_query::NodeRef::next_element_sibling)
        .is_some();
    let limit_length: usize = if has_next_sibling { 100 } else { 300 };

    if text_length >= limit_length {
        return false;
    }

    let (link_length, n_short_links, n_non_empty_links) = collect_link_info(&links);
    if n_non_empty_links == 0 {
        return true;
    }

    (link_length as f64) > (text_length as f64) * 0.8
        || (n_non_empty_links > 1 && (n_short_links as f64) / (n_non_empty_links as f64) > 0.8)
}

fn text_length_of_first(links: &Selection) -> usize {
    dom::first(links).map_or(0, |link| text_length(&link))
}
