//! JSON-LD Metadata Parsing
//!
//! Extracts structured metadata from Schema.org JSON-LD embedded in HTML
//! documents. Malformed scripts are skipped.

use dom_query::{Document, Selection};
use serde_json::{Map, Value};

use super::meta_tags::{normalize_date, normalize_language, validate_metadata_name};
use super::PageMetadata;
use crate::dom;

/// A typed Schema.org object found in a JSON-LD script.
#[derive(Debug, Clone)]
struct SchemaObject {
    types: Vec<String>,
    data: Map<String, Value>,
    depth: usize,
}

/// Extract metadata from JSON-LD scripts, filling only absent fields.
#[must_use]
pub fn extract_json_ld(doc: &Document, original: PageMetadata) -> PageMetadata {
    let mut result = original;

    let mut articles = Vec::new();
    let mut persons = Vec::new();
    for object in decode_json_ld(doc) {
        if is_article_type(&object.types) {
            articles.push(object);
        } else if is_person_type(&object.types) {
            persons.push(object);
        }
    }
    // Top-level objects describe the page; nested ones are often citations.
    articles.sort_by_key(|a| a.depth);

    for article in &articles {
        if result.title.is_none() {
            result.title = string_value(&article.data, "headline")
                .or_else(|| string_value(&article.data, "name"));
        }
        if result.description.is_none() {
            result.description = string_value(&article.data, "description");
        }
        if result.date.is_none() {
            result.date = string_value(&article.data, "datePublished")
                .or_else(|| string_value(&article.data, "dateCreated"))
                .map(|d| normalize_date(&d));
        }
        if result.language.is_none() {
            result.language =
                string_value(&article.data, "inLanguage").and_then(|l| normalize_language(&l));
        }
        if result.author.is_none() {
            result.author = article.data.get("author").and_then(author_name);
        }
    }

    if result.author.is_none() {
        result.author = persons.iter().find_map(|p| person_name(&p.data));
    }

    result
}

/// Parse every JSON-LD script and flatten typed objects, `@graph` included.
fn decode_json_ld(doc: &Document) -> Vec<SchemaObject> {
    let mut objects = Vec::new();

    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let text = dom::text_content(&Selection::from(*script));
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(text) {
            Ok(value) => collect_objects(&value, 0, &mut objects),
            Err(e) => tracing::trace!(error = %e, "skipping malformed JSON-LD"),
        }
    }

    objects
}

fn collect_objects(value: &Value, depth: usize, out: &mut Vec<SchemaObject>) {
    match value {
        Value::Object(map) => {
            let types = schema_types(map);
            let child_depth = if types.is_empty() {
                depth
            } else {
                out.push(SchemaObject {
                    types,
                    data: map.clone(),
                    depth,
                });
                depth + 1
            };
            for child in map.values() {
                collect_objects(child, child_depth, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_objects(item, depth, out);
            }
        }
        _ => {}
    }
}

/// Lowercased `@type` values of a schema object.
fn schema_types(map: &Map<String, Value>) -> Vec<String> {
    match map.get("@type") {
        Some(Value::String(s)) => vec![s.to_lowercase()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

/// Author value of an article: a string, a person object, or a list of either.
fn author_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| validate_metadata_name(s)),
        Value::Object(map) => person_name(map),
        Value::Array(items) => {
            let names: Vec<String> = items.iter().filter_map(author_name).collect();
            if names.is_empty() {
                None
            } else {
                Some(names.join(", "))
            }
        }
        _ => None,
    }
}

/// `name`, or `givenName` + `familyName`, of a person object.
fn person_name(data: &Map<String, Value>) -> Option<String> {
    if let Some(name) = string_value(data, "name").filter(|n| validate_metadata_name(n)) {
        return Some(name);
    }

    let given = string_value(data, "givenName").unwrap_or_default();
    let family = string_value(data, "familyName").unwrap_or_default();
    let full = format!("{given} {family}").trim().to_string();
    Some(full).filter(|n| validate_metadata_name(n))
}

/// A trimmed, non-empty string property; the first entry of an array.
fn string_value(data: &Map<String, Value>, key: &str) -> Option<String> {
    let value = match data.get(key)? {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let s = value.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(dom::clean_text(s))
    }
}

fn is_person_type(types: &[String]) -> bool {
    types.iter().any(|t| matches!(t.as_str(), "person" | "author"))
}

fn is_article_type(types: &[String]) -> bool {
    types.iter().any(|t| {
        matches!(
            t.as_str(),
            "article"
                | "newsarticle"
                | "blogposting"
                | "webpage"
                | "report"
                | "techarticle"
                | "scholarlyarticle"
                | "socialmediaposting"
                | "discussionforumposting"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> PageMetadata {
        extract_json_ld(&Document::from(html), PageMetadata::default())
    }

    #[test]
    fn test_simple_article_schema() {
        let metadata = extract(
            r#"<script type="application/ld+json">
            {
                "@context": "https://schema.org",
                "@type": "NewsArticle",
                "headline": "Test Article Title",
                "description": "Summary",
                "datePublished": "2024-01-15T10:00:00Z",
                "inLanguage": "en-US",
                "author": {"@type": "Person", "name": "John Doe"}
            }
            </script>"#,
        );

        assert_eq!(metadata.title, Some("Test Article Title".to_string()));
        assert_eq!(metadata.description, Some("Summary".to_string()));
        assert_eq!(metadata.date, Some("2024-01-15T10:00:00Z".to_string()));
        assert_eq!(metadata.language, Some("en".to_string()));
        assert_eq!(metadata.author, Some("John Doe".to_string()));
    }

    #[test]
    fn test_graph_array_schema() {
        let metadata = extract(
            r#"<script type="application/ld+json">
            {"@graph": [
                {"@type": "WebSite", "name": "Site"},
                {"@type": "BlogPosting", "headline": "From Graph"},
                {"@type": "Person", "givenName": "Ada", "familyName": "Lovelace"}
            ]}
            </script>"#,
        );

        assert_eq!(metadata.title, Some("From Graph".to_string()));
        assert_eq!(metadata.author, Some("Ada Lovelace".to_string()));
    }

    #[test]
    fn test_multiple_authors_are_joined() {
        let metadata = extract(
            r#"<script type="application/ld+json">
            {"@type": "Article", "author": [{"name": "A. Smith"}, "Bo Jones"]}
            </script>"#,
        );
        assert_eq!(metadata.author, Some("A. Smith, Bo Jones".to_string()));
    }

    #[test]
    fn test_invalid_json_skipped() {
        let metadata = extract(
            r#"<script type="application/ld+json">{not json</script>
            <script type="application/ld+json">{"@type": "Article", "headline": "Valid"}</script>"#,
        );
        assert_eq!(metadata.title, Some("Valid".to_string()));
    }

    #[test]
    fn test_preserves_original_metadata() {
        let doc = Document::from(
            r#"<script type="application/ld+json">{"@type": "Article", "headline": "New"}</script>"#,
        );
        let original = PageMetadata {
            title: Some("Original".to_string()),
            ..PageMetadata::default()
        };
        assert_eq!(extract_json_ld(&doc, original).title, Some("Original".to_string()));
    }
}
