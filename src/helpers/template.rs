//! Template variable substitution for content strings

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::SiteConfig;

lazy_static! {
    static ref CONTACT_VAR: Regex = Regex::new(r"\{contact\.(\w+)\}").unwrap();
}

/// Replace `{contact.<field>}` placeholders with values from the site contact map.
///
/// Unknown fields keep their placeholder text.
pub fn resolve_template_vars(text: &str, site: &SiteConfig) -> String {
    CONTACT_VAR
        .replace_all(text, |caps: &Captures| match site.contact_field(&caps[1]) {
            Some(value) => value,
            None => caps[0].to_string(),
        })
        .into_owned()
}
