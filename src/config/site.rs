//! Site content configuration (content/site.json)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Navigation, social links and contact details shared by every page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub nav: Vec<NavEntry>,
    pub social: Vec<SocialLink>,
    /// Contact fields; values are usually strings but any scalar is accepted
    pub contact: IndexMap<String, serde_json::Value>,
}

/// A top navigation link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavEntry {
    pub href: String,
    pub label: String,
}

impl NavEntry {
    /// Page name this entry points at (`#projects` -> `projects`)
    pub fn page(&self) -> Option<&str> {
        self.href
            .strip_prefix('#')
            .map(|rest| rest.split('/').next().unwrap_or(rest))
    }
}

/// A footer social link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub label: String,
}

impl SiteConfig {
    /// Look up a contact field as display text
    pub fn contact_field(&self, field: &str) -> Option<String> {
        match self.contact.get(field)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site_json() {
        let json = r##"{
            "nav": [{"href": "#home", "label": "Home"}, {"href": "#blog", "label": "Blog"}],
            "social": [{"platform": "github", "url": "https://github.com/me", "label": "GitHub"}],
            "contact": {"email": "me@example.com", "location": "Berlin"}
        }"##;
        let site: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(site.nav.len(), 2);
        assert_eq!(site.nav[1].page(), Some("blog"));
        assert_eq!(site.social[0].platform, "github");
        assert_eq!(site.contact_field("email").as_deref(), Some("me@example.com"));
        assert_eq!(site.contact.keys().collect::<Vec<_>>(), vec!["email", "location"]);
    }

    #[test]
    fn test_partial_site_json() {
        let site: SiteConfig = serde_json::from_str(r#"{"contact": {"phone": null}}"#).unwrap();
        assert!(site.nav.is_empty());
        assert_eq!(site.contact_field("phone"), None);
        assert_eq!(site.contact_field("email"), None);
    }

    #[test]
    fn test_nav_page() {
        let external = NavEntry {
            href: "https://example.com".to_string(),
            label: "Elsewhere".to_string(),
        };
        assert_eq!(external.page(), None);
    }
}
