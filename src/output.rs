//! Output serializers.
//!
//! Four renderings of a [`Document`]: pretty JSON, a Markdown page, plain
//! text and a colored terminal view. [`OutputFormat`] names them for the
//! command line.

use std::fmt;
use std::str::FromStr;

use colored::Colorize;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::markdown;

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Colored terminal output.
    #[default]
    Rich,
    Json,
    Text,
    Markdown,
}

impl OutputFormat {
    pub const ALL: [Self; 4] = [Self::Rich, Self::Json, Self::Text, Self::Markdown];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rich => "rich",
            Self::Json => "json",
            Self::Text => "text",
            Self::Markdown => "markdown",
        }
    }

    /// Render a document in this format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if JSON serialization fails.
    pub fn render(self, document: &Document) -> Result<String> {
        match self {
            Self::Rich => Ok(to_console(document)),
            Self::Json => to_json(document),
            Self::Text => Ok(to_text(document)),
            Self::Markdown => Ok(to_markdown(document)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "md" => Ok(Self::Markdown),
            "txt" | "plain" => Ok(Self::Text),
            _ => Self::ALL
                .into_iter()
                .find(|format| format.as_str() == wanted)
                .ok_or_else(|| Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Metadata fields in display order, skipping absent ones.
fn labeled_fields(document: &Document) -> Vec<(&'static str, &str)> {
    [
        ("Author", document.author.as_deref()),
        ("Date", document.date.as_deref()),
        ("Language", document.language.as_deref()),
        ("URL", Some(document.url.as_str())),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| (label, v)))
    .collect()
}

/// Serialize a document as pretty-printed JSON.
///
/// Absent fields are written as `null`.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if serialization fails.
pub fn to_json(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Render a document as a Markdown page.
///
/// ```text
/// # Title
///
/// **Author:** Jane Doe
/// **URL:** https://example.com/
///
/// > Description
///
/// Body
/// ```
#[must_use]
pub fn to_markdown(document: &Document) -> String {
    let mut sections = Vec::new();

    if let Some(title) = &document.title {
        sections.push(format!("# {}", markdown::escape_markdown(title)));
    }

    let fields = labeled_fields(document);
    let block = fields
        .iter()
        .map(|(label, value)| format!("**{label}:** {value}"))
        .collect::<Vec<_>>()
        .join("  \n");
    sections.push(block);

    if let Some(description) = &document.description {
        sections.push(markdown::blockquote(description, 1));
    }
    if !document.markdown.is_empty() {
        sections.push(document.markdown.clone());
    }

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

/// Render a document as plain text: `Label: value` lines, a blank line,
/// then the body.
#[must_use]
pub fn to_text(document: &Document) -> String {
    let mut lines = Vec::new();
    if let Some(title) = &document.title {
        lines.push(format!("Title: {title}"));
    }
    for (label, value) in labeled_fields(document) {
        lines.push(format!("{label}: {value}"));
    }
    if let Some(description) = &document.description {
        lines.push(format!("Description: {description}"));
    }

    let mut out = lines.join("\n");
    out.push_str("\n\n");
    out.push_str(&document.text);
    out.push('\n');
    out
}

/// Render a document for a terminal, with colors when the terminal
/// supports them.
#[must_use]
pub fn to_console(document: &Document) -> String {
    let mut out = String::new();
    let rule = "─".repeat(72);

    if let Some(title) = &document.title {
        out.push_str(&format!("{}\n", title.bold().cyan()));
    }
    for (label, value) in labeled_fields(document) {
        let value = match label {
            "Author" => value.green(),
            "URL" => value.blue().underline(),
            _ => value.normal(),
        };
        out.push_str(&format!("{} {value}\n", format!("{label}:").dimmed()));
    }
    if let Some(description) = &document.description {
        out.push_str(&format!("\n{}\n", description.italic()));
    }

    out.push_str(&format!("{}\n", rule.dimmed()));
    if document.text.is_empty() {
        out.push_str(&format!("{}\n", "(no content extracted)".yellow()));
    } else {
        out.push_str(&document.text);
        out.push('\n');
    }
    if !document.links.is_empty() {
        out.push_str(&format!("{}\n", rule.dimmed()));
        out.push_str(&format!("{}\n", format!("Links ({})", document.links.len()).bold()));
        for link in &document.links {
            out.push_str(&format!("  {}\n", link.blue()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document {
            title: Some("Hello World".to_string()),
            author: Some("Jane Doe".to_string()),
            date: Some("2024-03-15".to_string()),
            description: Some("A short summary.".to_string()),
            language: None,
            url: "https://example.com/hello".to_string(),
            text: "First paragraph.\n\nSecond paragraph.".to_string(),
            markdown: "First paragraph.\n\n**Second** paragraph.".to_string(),
            links: vec!["https://example.com/x".to_string()],
        }
    }

    #[test]
    fn test_json_uses_null_for_absent_fields() {
        let json = match to_json(&sample()) {
            Ok(json) => json,
            Err(e) => panic!("serialization failed: {e}"),
        };
        let value: serde_json::Value = match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => panic!("invalid JSON: {e}"),
        };

        assert_eq!(value["title"], "Hello World");
        assert!(value["language"].is_null());
        assert_eq!(value["links"][0], "https://example.com/x");
        assert!(json.contains("\n  \"title\""), "expected pretty output");
    }

    #[test]
    fn test_markdown_layout() {
        let md = to_markdown(&sample());
        assert_eq!(
            md,
            "# Hello World\n\n\
             **Author:** Jane Doe  \n\
             **Date:** 2024-03-15  \n\
             **URL:** https://example.com/hello\n\n\
             > A short summary.\n\n\
             First paragraph.\n\n**Second** paragraph.\n"
        );
    }

    #[test]
    fn test_text_layout() {
        let text = to_text(&sample());
        assert_eq!(
            text,
            "Title: Hello World\n\
             Author: Jane Doe\n\
             Date: 2024-03-15\n\
             URL: https://example.com/hello\n\
             Description: A short summary.\n\n\
             First paragraph.\n\nSecond paragraph.\n"
        );
    }

    #[test]
    fn test_text_of_empty_document() {
        let text = to_text(&Document::empty("https://example.com"));
        assert_eq!(text, "URL: https://example.com\n\n\n");
    }

    #[test]
    fn test_console_mentions_every_part() {
        let console = to_console(&sample());
        for part in ["Hello World", "Jane Doe", "First paragraph.", "https://example.com/x"] {
            assert!(console.contains(part), "missing {part}");
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().ok(), Some(OutputFormat::Json));
        assert_eq!("Markdown".parse::<OutputFormat>().ok(), Some(OutputFormat::Markdown));
        assert_eq!("md".parse::<OutputFormat>().ok(), Some(OutputFormat::Markdown));
        assert_eq!(" rich ".parse::<OutputFormat>().ok(), Some(OutputFormat::Rich));
        assert!(matches!("yaml".parse::<OutputFormat>(), Err(Error::UnknownFormat(_))));
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }
}
