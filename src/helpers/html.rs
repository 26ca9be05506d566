//! HTML helper functions

/// Generate an anchor tag
///
/// Absolute `http(s)` links open in a new tab.
///
/// # Examples
/// ```ignore
/// link_to("#projects", "Projects") // -> <a href="#projects">Projects</a>
/// ```
pub fn link_to(href: &str, text: &str) -> String {
    if is_external(href) {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            html_escape(href),
            html_escape(text)
        )
    } else {
        format!(r#"<a href="{}">{}</a>"#, html_escape(href), html_escape(text))
    }
}

/// Generate an anchor tag with a CSS class
pub fn link_with_class(href: &str, text: &str, class: &str) -> String {
    let external = if is_external(href) {
        r#" target="_blank" rel="noopener""#
    } else {
        ""
    };
    format!(
        r#"<a class="{}" href="{}"{}>{}</a>"#,
        class,
        html_escape(href),
        external,
        html_escape(text)
    )
}

/// Render a list of tags as pills
pub fn tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let items: String = tags
        .iter()
        .map(|t| format!(r#"<li class="tag">{}</li>"#, html_escape(t)))
        .collect();
    format!(r#"<ul class="tags">{}</ul>"#, items)
}

/// Whether a link leaves the site
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("mailto:")
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
