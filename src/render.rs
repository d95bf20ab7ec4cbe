//! Structural renderer.
//!
//! Walks a content subtree once and produces plain text, Markdown and the
//! links it contains. Block elements (headings, paragraphs, lists, tables,
//! code blocks, quotes) become separate blocks joined by a blank line, so
//! paragraph and heading boundaries survive in both outputs. Inline markup
//! (emphasis, code spans, links) only affects the Markdown output.

use dom_query::{NodeRef, Selection};
use url::Url;

use crate::dom;
use crate::markdown::{self, Alignment};
use crate::patterns::{INLINE_SPACES, MULTIPLE_NEWLINES, WHITESPACE_NORMALIZE};
use crate::url_utils::LinkSet;
use crate::Options;

/// Elements that never contribute content.
const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "title", "meta", "link", "iframe", "object",
    "embed", "svg", "canvas", "button", "input", "select", "textarea", "option",
];

/// Elements rendered as their own block.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "dd", "details", "dialog", "div",
    "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary",
    "table", "caption", "thead", "tbody", "tfoot", "tr", "td", "th", "ul",
];

/// Descendants that turn a table into a layout table.
const LAYOUT_TABLE_MARKERS: &str = "table, p, div, ul, ol, pre, blockquote, h1, h2, h3, h4";

/// Element nesting rendered structurally; deeper subtrees become plain text.
const MAX_NESTING: usize = 96;

fn is_block(tag: &str) -> bool {
    // Custom elements (`shreddit-comment`, `faceplate-*`) are layout wrappers.
    BLOCK_TAGS.contains(&tag) || tag.contains('-')
}

/// Text and Markdown rendering of a subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub markdown: String,
}

impl Rendered {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.markdown.is_empty()
    }
}

/// Inline run being accumulated for the current paragraph.
#[derive(Debug, Default)]
struct Inline {
    text: String,
    markdown: String,
}

impl Inline {
    fn push(&mut self, other: Self) {
        self.text.push_str(&other.text);
        self.markdown.push_str(&other.markdown);
    }

    fn push_text(&mut self, raw: &str) {
        let text = WHITESPACE_NORMALIZE.replace_all(raw, " ");
        self.markdown.push_str(&markdown::escape_markdown(&text));
        self.text.push_str(&text);
    }

    fn push_separator(&mut self) {
        self.text.push(' ');
        self.markdown.push(' ');
    }

    fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Surround trimmed `inner` with `marker`, keeping outer whitespace outside.
fn wrap(inner: Inline, marker: &str) -> Inline {
    let trimmed = inner.markdown.trim();
    if trimmed.is_empty() {
        return inner;
    }
    let lead = if inner.markdown.starts_with(char::is_whitespace) { " " } else { "" };
    let trail = if inner.markdown.ends_with(char::is_whitespace) { " " } else { "" };
    Inline {
        markdown: format!("{lead}{marker}{trimmed}{marker}{trail}"),
        text: inner.text,
    }
}

/// Collapse spaces, trim every line and drop blank lines.
fn finish_inline(s: &str) -> String {
    s.lines()
        .map(|line| INLINE_SPACES.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_blocks(parts: impl Iterator<Item = String>) -> String {
    let joined = parts.filter(|p| !p.is_empty()).collect::<Vec<_>>().join("\n\n");
    MULTIPLE_NEWLINES.replace_all(&joined, "\n\n").into_owned()
}

/// Renders content subtrees, collecting links across every call.
///
/// One renderer is used per document so links from a post body and its
/// comments are deduplicated together.
pub struct Renderer<'u> {
    base: &'u Url,
    markdown_links: bool,
    links: LinkSet,
    depth: usize,
}

impl<'u> Renderer<'u> {
    #[must_use]
    pub fn new(base: &'u Url, options: &Options) -> Self {
        Self {
            base,
            markdown_links: options.markdown_links,
            links: LinkSet::new(),
            depth: 0,
        }
    }

    /// Render every node in `root` as a block: lists keep their markers,
    /// quotes their `>` and headings their level.
    pub fn render(&mut self, root: &Selection<'_>) -> Rendered {
        let mut blocks = Vec::new();
        for node in root.nodes() {
            match dom::node_tag(node) {
                Some(tag) if is_block(&tag) => self.block(node, &tag, &mut blocks),
                _ => self.walk_container(node, &mut blocks),
            }
        }
        Self::join(blocks)
    }

    /// Links discovered so far, first-seen order.
    #[must_use]
    pub fn into_links(self) -> Vec<String> {
        self.links.into_vec()
    }

    fn join(blocks: Vec<Rendered>) -> Rendered {
        Rendered {
            text: join_blocks(blocks.iter().map(|b| b.text.clone())),
            markdown: join_blocks(blocks.into_iter().map(|b| b.markdown)),
        }
    }

    fn walk_container(&mut self, node: &NodeRef<'_>, blocks: &mut Vec<Rendered>) {
        let mut paragraph = Inline::default();

        for child in node.children() {
            if child.is_text() {
                paragraph.push_text(&child.text());
                continue;
            }
            let Some(tag) = dom::node_tag(&child) else {
                continue;
            };
            if SKIP_TAGS.contains(&tag.as_str()) {
                continue;
            }

            if is_block(&tag) {
                Self::flush(&mut paragraph, blocks);
                self.block(&child, &tag, blocks);
            } else {
                let inline = self.inline(&child, &tag);
                paragraph.push(inline);
            }
        }

        Self::flush(&mut paragraph, blocks);
    }

    fn flush(paragraph: &mut Inline, blocks: &mut Vec<Rendered>) {
        let inline = paragraph.take();
        let block = Rendered {
            text: finish_inline(&inline.text),
            markdown: finish_inline(&inline.markdown),
        };
        if !block.is_empty() {
            blocks.push(block);
        }
    }

    fn block(&mut self, node: &NodeRef<'_>, tag: &str, blocks: &mut Vec<Rendered>) {
        if self.depth >= MAX_NESTING {
            blocks.extend(Self::flattened(node));
            return;
        }
        self.depth += 1;
        self.block_element(node, tag, blocks);
        self.depth -= 1;
    }

    /// Whitespace-normalized text of a subtree as one paragraph.
    fn flattened(node: &NodeRef<'_>) -> Option<Rendered> {
        let text = dom::clean_text_of(&Selection::from(*node))?;
        Some(Rendered {
            markdown: markdown::escape_markdown(&text),
            text,
        })
    }

    fn block_element(&mut self, node: &NodeRef<'_>, tag: &str, blocks: &mut Vec<Rendered>) {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag[1..].parse::<usize>().unwrap_or(1);
                let inline = self.inline_children(node);
                let text = finish_inline(&inline.text).replace('\n', " ");
                if !text.is_empty() {
                    let markdown = finish_inline(&inline.markdown).replace('\n', " ");
                    blocks.push(Rendered {
                        text,
                        markdown: format!("{} {markdown}", "#".repeat(level)),
                    });
                }
            }
            "pre" => blocks.extend(Self::code_block(node)),
            "blockquote" => {
                let mut inner = Vec::new();
                self.walk_container(node, &mut inner);
                let inner = Self::join(inner);
                if !inner.is_empty() {
                    blocks.push(Rendered {
                        markdown: markdown::blockquote(&inner.markdown, 1),
                        text: inner.text,
                    });
                }
            }
            "ul" | "ol" => {
                let (text, markdown) = self.list(node, tag == "ol", "");
                if !text.is_empty() || !markdown.is_empty() {
                    blocks.push(Rendered {
                        text: text.join("\n"),
                        markdown: markdown.join("\n"),
                    });
                }
            }
            "table" if !Selection::from(*node).select(LAYOUT_TABLE_MARKERS).exists() => {
                blocks.extend(self.table(node));
            }
            "hr" => blocks.push(Rendered {
                text: String::new(),
                markdown: "---".to_string(),
            }),
            _ => self.walk_container(node, blocks),
        }
    }

    fn code_block(node: &NodeRef<'_>) -> Option<Rendered> {
        let sel = Selection::from(*node);
        let raw = dom::text_content(&sel);
        let code = raw.trim_matches('\n').trim_end();
        if code.trim().is_empty() {
            return None;
        }

        let language = std::iter::once(sel.clone())
            .chain(sel.select("code").iter())
            .filter_map(|s| s.attr("class"))
            .find_map(|class| {
                class.split_whitespace().find_map(|token| {
                    token
                        .strip_prefix("language-")
                        .or_else(|| token.strip_prefix("lang-"))
                        .map(str::to_string)
                })
            });

        Some(Rendered {
            text: code.to_string(),
            markdown: markdown::code_fence(code, language.as_deref()),
        })
    }

    /// Render a list as lines; nested lists are indented under their item.
    fn list(&mut self, node: &NodeRef<'_>, ordered: bool, indent: &str) -> (Vec<String>, Vec<String>) {
        let mut text_lines = Vec::new();
        let mut markdown_lines = Vec::new();
        let mut number = Selection::from(*node)
            .attr("start")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1);

        for item in node.children() {
            if dom::node_tag(&item).as_deref() != Some("li") {
                continue;
            }
            let marker = if ordered { format!("{number}.") } else { "-".to_string() };
            let child_indent = format!("{indent}{}", " ".repeat(marker.len() + 1));

            let mut content = Inline::default();
            let mut nested_text = Vec::new();
            let mut nested_markdown = Vec::new();
            for child in item.children() {
                if child.is_text() {
                    content.push_text(&child.text());
                    continue;
                }
                let Some(tag) = dom::node_tag(&child) else {
                    continue;
                };
                match tag.as_str() {
                    "ul" | "ol" if self.depth >= MAX_NESTING => {
                        content.push_text(&dom::text_content(&Selection::from(child)));
                    }
                    "ul" | "ol" => {
                        self.depth += 1;
                        let (t, m) = self.list(&child, tag == "ol", &child_indent);
                        self.depth -= 1;
                        nested_text.extend(t);
                        nested_markdown.extend(m);
                    }
                    t if SKIP_TAGS.contains(&t) => {}
                    _ => {
                        let inline = self.inline(&child, &tag);
                        content.push(inline);
                    }
                }
            }

            let text = finish_inline(&content.text).replace('\n', " ");
            let markdown = finish_inline(&content.markdown).replace('\n', " ");
            if !text.is_empty() || !markdown.is_empty() {
                text_lines.push(format!("{indent}{marker} {text}"));
                markdown_lines.push(format!("{indent}{marker} {markdown}"));
            }
            text_lines.extend(nested_text);
            markdown_lines.extend(nested_markdown);
            number = number.saturating_add(1);
        }

        (text_lines, markdown_lines)
    }

    fn table(&mut self, node: &NodeRef<'_>) -> Option<Rendered> {
        let mut text_rows = Vec::new();
        let mut markdown_rows = Vec::new();
        let mut alignments = Vec::new();

        for row in Selection::from(*node).select("tr").nodes() {
            let cells: Vec<NodeRef<'_>> = row
                .children()
                .into_iter()
                .filter(|c| matches!(dom::node_tag(c).as_deref(), Some("th" | "td")))
                .collect();

            let mut text_cells = Vec::with_capacity(cells.len());
            let mut markdown_cells = Vec::with_capacity(cells.len());
            for cell in &cells {
                let inline = self.inline_children(cell);
                text_cells.push(finish_inline(&inline.text).replace('\n', " "));
                markdown_cells.push(finish_inline(&inline.markdown).replace('\n', " "));
            }
            if text_cells.iter().all(String::is_empty) && markdown_cells.iter().all(String::is_empty) {
                continue;
            }

            if markdown_rows.is_empty() {
                alignments = cells
                    .iter()
                    .map(|c| {
                        Selection::from(*c)
                            .attr("align")
                            .map_or(Alignment::None, |a| Alignment::from_attr(&a))
                    })
                    .collect();
            }
            text_rows.push(text_cells.join(" | "));
            markdown_rows.push(markdown_cells);
        }

        if markdown_rows.is_empty() {
            return None;
        }
        Some(Rendered {
            text: text_rows.join("\n"),
            markdown: markdown::gfm_table(&markdown_rows, &alignments),
        })
    }

    fn inline_children(&mut self, node: &NodeRef<'_>) -> Inline {
        let mut out = Inline::default();
        for child in node.children() {
            if child.is_text() {
                out.push_text(&child.text());
                continue;
            }
            let Some(tag) = dom::node_tag(&child) else {
                continue;
            };
            if SKIP_TAGS.contains(&tag.as_str()) {
                continue;
            }
            let inline = self.inline(&child, &tag);
            out.push(inline);
        }
        out
    }

    fn inline(&mut self, node: &NodeRef<'_>, tag: &str) -> Inline {
        if self.depth >= MAX_NESTING {
            let mut flat = Inline::default();
            flat.push_text(&dom::text_content(&Selection::from(*node)));
            return flat;
        }
        self.depth += 1;
        let inline = self.inline_element(node, tag);
        self.depth -= 1;
        inline
    }

    fn inline_element(&mut self, node: &NodeRef<'_>, tag: &str) -> Inline {
        match tag {
            "br" => Inline {
                text: "\n".to_string(),
                markdown: "\n".to_string(),
            },
            "a" => self.link(node),
            "strong" | "b" => wrap(self.inline_children(node), "**"),
            "em" | "i" => wrap(self.inline_children(node), "*"),
            "del" | "s" | "strike" => wrap(self.inline_children(node), "~~"),
            "code" | "kbd" | "samp" | "tt" => {
                let code = dom::clean_text(&dom::text_content(&Selection::from(*node)));
                Inline {
                    markdown: markdown::inline_code(&code),
                    text: code,
                }
            }
            "img" => self.image(node),
            _ if is_block(tag) => {
                let mut inline = Inline::default();
                inline.push_separator();
                inline.push(self.inline_children(node));
                inline.push_separator();
                inline
            }
            _ => self.inline_children(node),
        }
    }

    fn link(&mut self, node: &NodeRef<'_>) -> Inline {
        let inner = self.inline_children(node);
        let href = Selection::from(*node).attr("href");
        let url = href.and_then(|h| self.links.push_href(&h, self.base));

        let trimmed = inner.markdown.trim();
        match url {
            Some(url) if self.markdown_links && !trimmed.is_empty() => {
                let lead = if inner.markdown.starts_with(char::is_whitespace) { " " } else { "" };
                let trail = if inner.markdown.ends_with(char::is_whitespace) { " " } else { "" };
                Inline {
                    markdown: format!("{lead}[{trimmed}]({url}){trail}"),
                    text: inner.text,
                }
            }
            _ => inner,
        }
    }

    fn image(&self, node: &NodeRef<'_>) -> Inline {
        let sel = Selection::from(*node);
        let alt = dom::non_empty_attribute(&sel, "alt").map(|a| dom::clean_text(&a)).unwrap_or_default();
        let src = dom::non_empty_attribute(&sel, "src")
            .and_then(|src| crate::url_utils::normalize_link(&src, self.base))
            .filter(|src| src.starts_with("http"));

        match src {
            Some(src) => Inline {
                text: String::new(),
                markdown: format!("![{}]({src})", markdown::escape_markdown(&alt)),
            },
            None => Inline::default(),
        }
    }
}

/// Render one subtree with a fresh renderer, returning its links as well.
#[must_use]
pub fn render_block(root: &Selection<'_>, base: &Url, options: &Options) -> (Rendered, Vec<String>) {
    let mut renderer = Renderer::new(base, options);
    let rendered = renderer.render(root);
    (rendered, renderer.into_links())
}
