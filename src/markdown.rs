//! Markdown building blocks.
//!
//! Escaping, code spans, fences, block quotes and GFM tables. The structural
//! renderer walks the DOM and calls into these helpers; nothing here knows
//! about HTML.

/// Characters that have special meaning in Markdown and need escaping.
const MARKDOWN_SPECIAL_CHARS: &[char] = &['\\', '*', '_', '[', ']', '`'];

/// Escape Markdown special characters in text content.
///
/// Only characters that would change inline formatting are escaped. Block
/// markers at line starts (`#`, `>`, `-`) are left alone because the
/// renderer never places raw text at the start of a block.
///
/// # Examples
///
/// ```
/// use shieldscrape::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*not italic*"), r"\*not italic\*");
/// assert_eq!(escape_markdown("my_variable_name"), r"my\_variable\_name");
/// assert_eq!(escape_markdown("plain"), "plain");
/// ```
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    if !text.contains(MARKDOWN_SPECIAL_CHARS) {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        if MARKDOWN_SPECIAL_CHARS.contains(&ch) {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

/// Longest run of consecutive backticks in `text`.
fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Wrap `code` in a code span that survives embedded backticks.
#[must_use]
pub fn inline_code(code: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        return String::new();
    }
    let ticks = "`".repeat(longest_backtick_run(code) + 1);
    if code.starts_with('`') || code.ends_with('`') {
        format!("{ticks} {code} {ticks}")
    } else {
        format!("{ticks}{code}{ticks}")
    }
}

/// Fenced code block; the fence is longer than any backtick run inside.
#[must_use]
pub fn code_fence(code: &str, language: Option<&str>) -> String {
    let fence = "`".repeat(longest_backtick_run(code).max(2) + 1);
    let code = code.trim_end_matches('\n');
    format!("{fence}{}\n{code}\n{fence}", language.unwrap_or_default())
}

/// Prefix every line of `text` with `depth` levels of `> `.
///
/// Blank lines keep the bare marker so the quote stays one block.
#[must_use]
pub fn blockquote(text: &str, depth: usize) -> String {
    if depth == 0 {
        return text.to_string();
    }
    let marker = ">".repeat(depth);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                marker.clone()
            } else {
                format!("{marker} {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Column alignment of a GFM table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Alignment named by an HTML `align` attribute or `text-align` value.
    #[must_use]
    pub fn from_attr(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::None,
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Self::None => "---",
            Self::Left => ":---",
            Self::Center => ":---:",
            Self::Right => "---:",
        }
    }
}

/// Render rows of cell text as a GFM table.
///
/// The first row is always the header row, since GFM has no headerless
/// tables. Short rows are padded with empty cells. Pipes and newlines in
/// cells are escaped so a cell can never break the row.
///
/// ```text
/// | Name | Score |
/// | --- | ---: |
/// | a | 1 |
/// ```
#[must_use]
pub fn gfm_table(rows: &[Vec<String>], alignments: &[Alignment]) -> String {
    let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    if col_count == 0 {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (idx, row) in rows.iter().enumerate() {
        let cells: Vec<String> = (0..col_count)
            .map(|col| row.get(col).map(|c| table_cell(c)).unwrap_or_default())
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));

        if idx == 0 {
            let separators: Vec<&str> = (0..col_count)
                .map(|col| alignments.get(col).copied().unwrap_or_default().separator())
                .collect();
            lines.push(format!("| {} |", separators.join(" | ")));
        }
    }
    lines.join("\n")
}

fn table_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', r"\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_inline_markers() {
        assert_eq!(escape_markdown("[link](x)"), r"\[link\](x)");
        assert_eq!(escape_markdown(r"a\b"), r"a\\b");
        assert_eq!(escape_markdown("`tick`"), r"\`tick\`");
        assert_eq!(escape_markdown("> not a quote"), "> not a quote");
    }

    #[test]
    fn inline_code_handles_backticks() {
        assert_eq!(inline_code("let x = 1;"), "`let x = 1;`");
        assert_eq!(inline_code("a`b"), "``a`b``");
        assert_eq!(inline_code("`x`"), "`` `x` ``");
        assert_eq!(inline_code("  "), "");
    }

    #[test]
    fn code_fence_outgrows_content() {
        assert_eq!(code_fence("fn main() {}\n", Some("rust")), "```rust\nfn main() {}\n```");
        assert_eq!(code_fence("````", None), "`````\n````\n`````");
    }

    #[test]
    fn blockquote_nests() {
        assert_eq!(blockquote("a\n\nb", 1), "> a\n>\n> b");
        assert_eq!(blockquote("x", 3), ">>> x");
        assert_eq!(blockquote("x", 0), "x");
    }

    #[test]
    fn table_with_header_and_alignment() {
        let rows = vec![
            vec!["Name".to_string(), "Score".to_string()],
            vec!["a|b".to_string()],
        ];
        let table = gfm_table(&rows, &[Alignment::None, Alignment::Right]);
        assert_eq!(table, "| Name | Score |\n| --- | ---: |\n| a\\|b |  |");
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert_eq!(gfm_table(&[], &[]), "");
        assert_eq!(Alignment::from_attr("CENTER"), Alignment::Center);
    }
}
