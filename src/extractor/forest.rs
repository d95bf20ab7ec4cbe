//! Comment forest reconstruction.
//!
//! Comments arrive as a flat list in document order, each tagged with the
//! depth read from the markup. A comment becomes a child of the nearest
//! preceding comment whose depth is exactly one less; when there is none it
//! becomes a root. Sibling order is source order.
//!
//! Parents always precede their children, so the tree is assembled
//! bottom-up by walking the list backwards: every node is built once, with
//! its complete child list, and never touched again.

use crate::document::RedditComment;

/// A comment before tree reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatComment {
    /// Depth as read from the markup; may contain gaps.
    pub depth: usize,
    /// The comment itself; `children` and `depth` are set by [`build_forest`].
    pub comment: RedditComment,
}

/// Build the comment forest from a flat, depth-annotated stream.
///
/// The `depth` of each returned comment is its actual nesting level, which
/// differs from the markup depth when a comment had to be attached at the
/// root for lack of a parent.
#[must_use]
pub fn build_forest(flat: Vec<FlatComment>) -> Vec<RedditComment> {
    let len = flat.len();
    let mut parents: Vec<Option<usize>> = Vec::with_capacity(len);
    let mut levels: Vec<usize> = Vec::with_capacity(len);
    // Most recent comment index seen at each markup depth.
    let mut last_seen: Vec<Option<usize>> = Vec::new();

    for (idx, item) in flat.iter().enumerate() {
        let parent = item
            .depth
            .checked_sub(1)
            .and_then(|d| last_seen.get(d).copied().flatten());
        parents.push(parent);
        levels.push(parent.map_or(0, |p| levels[p] + 1));

        if last_seen.len() <= item.depth {
            last_seen.resize(item.depth + 1, None);
        }
        last_seen[item.depth] = Some(idx);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); len];
    let mut roots = Vec::new();
    for (idx, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(idx),
            None => roots.push(idx),
        }
    }

    let mut built: Vec<Option<RedditComment>> = vec![None; len];
    for (idx, item) in flat.into_iter().enumerate().rev() {
        let kids = children[idx]
            .iter()
            .filter_map(|child| built[*child].take())
            .collect();
        built[idx] = Some(RedditComment {
            depth: levels[idx],
            children: kids,
            ..item.comment
        });
    }

    roots.into_iter().filter_map(|idx| built[idx].take()).collect()
}
