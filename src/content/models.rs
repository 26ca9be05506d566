//! Content models - the JSON index files and loaded markdown documents

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use super::frontmatter::MetaValue;

/// A listing file such as `projects/_index.json` or `blog/_index.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingIndex<T> {
    pub title: String,
    /// Markdown allowed (rendered inline)
    pub intro: String,
    pub items: Vec<T>,
}

impl<T> Default for ListingIndex<T> {
    fn default() -> Self {
        Self {
            title: String::new(),
            intro: String::new(),
            items: Vec::new(),
        }
    }
}

/// A project card in `projects/_index.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(deserialize_with = "year_text")]
    pub year: Option<String>,
}

/// A post preview in `blog/_index.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    /// Drafts stay out of the listing
    pub draft: bool,
}

pub type ProjectIndex = ListingIndex<ProjectSummary>;
pub type BlogIndex = ListingIndex<PostSummary>;

impl BlogIndex {
    /// Posts that belong in the listing
    pub fn published(&self) -> impl Iterator<Item = &PostSummary> {
        self.items.iter().filter(|post| !post.draft)
    }
}

/// `publications.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Publications {
    pub title: String,
    pub intro: String,
    pub items: Vec<Publication>,
    /// Inline markdown; may contain `{contact.<field>}` placeholders
    pub note: Option<String>,
}

/// A single publication entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub title: String,
    pub authors: String,
    pub venue: String,
    #[serde(deserialize_with = "year_number")]
    pub year: Option<u32>,
    pub url: Option<String>,
    pub pdf: Option<String>,
}

/// Index files are written by hand, so years show up as `2024` or `"2024"`
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn year_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let year = Option::<StringOrNumber>::deserialize(deserializer)?.map(|v| match v {
        StringOrNumber::String(s) => s.trim().to_string(),
        StringOrNumber::Number(n) => n.to_string(),
    });
    Ok(year.filter(|y| !y.is_empty()))
}

/// Strings that are not a plain year (`"forthcoming"`) count as undated
fn year_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.and_then(|v| match v {
            StringOrNumber::String(s) => s.trim().parse().ok(),
            StringOrNumber::Number(n) => n.as_u64().and_then(|y| u32::try_from(y).ok()),
        }),
    )
}

/// A markdown file after front-matter extraction and HTML conversion
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarkdownDoc {
    pub meta: HashMap<String, MetaValue>,
    pub html: String,
}

impl MarkdownDoc {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.meta
            .get(key)
            .and_then(MetaValue::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn tags(&self) -> Vec<String> {
        self.meta
            .get("tags")
            .map(MetaValue::to_tags)
            .unwrap_or_default()
    }

    /// Display form of any scalar field (`date: 2024` is a number, not a string)
    pub fn get_display(&self, key: &str) -> Option<String> {
        self.meta
            .get(key)
            .map(|v| v.to_string())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_index_filters_drafts() {
        let index: BlogIndex = serde_json::from_str(
            r#"{
                "title": "Blog",
                "items": [
                    {"slug": "one", "title": "One", "date": "2024-01-01"},
                    {"slug": "two", "title": "Two", "draft": true},
                    {"slug": "three", "title": "Three", "draft": false}
                ]
            }"#,
        )
        .unwrap();

        let slugs: Vec<_> = index.published().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["one", "three"]);
        assert_eq!(index.intro, "");
    }

    #[test]
    fn test_publications_partial() {
        let pubs: Publications =
            serde_json::from_str(r#"{"items": [{"title": "Paper", "year": 2023}]}"#).unwrap();
        assert_eq!(pubs.items[0].year, Some(2023));
        assert!(pubs.note.is_none());
    }

    #[test]
    fn test_year_as_number_or_string() {
        let projects: ProjectIndex = serde_json::from_str(
            r#"{"items": [
                {"slug": "a", "year": 2024},
                {"slug": "b", "year": "2019-2021"},
                {"slug": "c", "year": null},
                {"slug": "d"}
            ]}"#,
        )
        .unwrap();
        let years: Vec<_> = projects.items.iter().map(|p| p.year.as_deref()).collect();
        assert_eq!(years, vec![Some("2024"), Some("2019-2021"), None, None]);

        let pubs: Publications = serde_json::from_str(
            r#"{"items": [
                {"title": "A", "year": "2023"},
                {"title": "B", "year": 2021},
                {"title": "C", "year": "forthcoming"}
            ]}"#,
        )
        .unwrap();
        let years: Vec<_> = pubs.items.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![Some(2023), Some(2021), None]);
    }

    #[test]
    fn test_markdown_doc_accessors() {
        let mut meta = HashMap::new();
        meta.insert("title".to_string(), MetaValue::String("T".to_string()));
        meta.insert("date".to_string(), MetaValue::Integer(2024));
        meta.insert("github".to_string(), MetaValue::String(String::new()));
        let doc = MarkdownDoc {
            meta,
            html: String::new(),
        };
        assert_eq!(doc.get_str("title"), Some("T"));
        assert_eq!(doc.get_str("github"), None);
        assert_eq!(doc.get_display("date").as_deref(), Some("2024"));
        assert!(doc.tags().is_empty());
    }
}
