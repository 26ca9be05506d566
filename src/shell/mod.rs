//! Presentation shell
//!
//! The [`Presenter`] trait is everything the router needs from a display
//! surface. [`HtmlShell`] is the implementation used by the CLI and the
//! development server: it keeps the nav, footer and content container in
//! memory and assembles them into a full HTML document on demand.

use parking_lot::Mutex;

use crate::config::{NavEntry, SocialLink};
use crate::helpers::html_escape;

/// A display surface for rendered pages
pub trait Presenter: Send + Sync {
    /// Replace the content container
    fn display(&self, html: &str, page_class: &str);

    fn populate_nav(&self, entries: &[NavEntry]);

    fn populate_footer(&self, social: &[SocialLink]);

    /// Highlight the nav entry for `page`
    fn set_active_nav(&self, page: &str);

    fn scroll_to_top(&self) {}
}

/// Icon name for a social platform
pub fn icon_for(platform: &str) -> &'static str {
    match platform.to_ascii_lowercase().as_str() {
        "github" => "icon-github",
        "gitlab" => "icon-gitlab",
        "linkedin" => "icon-linkedin",
        "twitter" | "x" => "icon-twitter",
        "mastodon" => "icon-mastodon",
        "bluesky" => "icon-bluesky",
        "scholar" | "google-scholar" => "icon-scholar",
        "orcid" => "icon-orcid",
        "email" | "mail" => "icon-mail",
        "rss" => "icon-rss",
        _ => "icon-link",
    }
}

#[derive(Debug, Default)]
struct ShellState {
    nav: Vec<NavEntry>,
    social: Vec<SocialLink>,
    active: Option<String>,
    container_html: String,
    container_class: String,
}

/// In-memory HTML shell
#[derive(Debug)]
pub struct HtmlShell {
    title: String,
    state: Mutex<ShellState>,
    extra_body: String,
}

impl HtmlShell {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            state: Mutex::new(ShellState::default()),
            extra_body: String::new(),
        }
    }

    /// Append raw markup (scripts) before `</body>`
    pub fn with_body_script(mut self, script: impl Into<String>) -> Self {
        self.extra_body.push_str(&script.into());
        self
    }

    /// Current container contents as `(class, html)`
    pub fn container(&self) -> (String, String) {
        let state = self.state.lock();
        (state.container_class.clone(), state.container_html.clone())
    }

    pub fn active_page(&self) -> Option<String> {
        self.state.lock().active.clone()
    }

    /// Navigation markup with the active entry marked
    pub fn nav_html(&self) -> String {
        let state = self.state.lock();
        let links: String = state
            .nav
            .iter()
            .map(|entry| {
                let page = entry.page().unwrap_or_default();
                let active = match (&state.active, entry.page()) {
                    (Some(current), Some(page)) if current == page => " active",
                    _ => "",
                };
                format!(
                    r#"<a href="{}" class="nav-link{}" data-page="{}">{}</a>"#,
                    html_escape(&entry.href),
                    active,
                    html_escape(page),
                    html_escape(&entry.label)
                )
            })
            .collect();
        format!(r#"<nav id="main-nav">{}</nav>"#, links)
    }

    /// Footer markup with social links
    pub fn footer_html(&self) -> String {
        let state = self.state.lock();
        let links: String = state
            .social
            .iter()
            .map(|link| {
                format!(
                    r#"<a href="{}" class="social-link {}" target="_blank" rel="noopener" aria-label="{}"><span class="icon {}"></span></a>"#,
                    html_escape(&link.url),
                    html_escape(&link.platform),
                    html_escape(&link.label),
                    icon_for(&link.platform)
                )
            })
            .collect();
        format!(
            r#"<footer class="site-footer"><div class="social-links">{}</div></footer>"#,
            links
        )
    }

    /// The complete page
    pub fn document(&self) -> String {
        let nav = self.nav_html();
        let footer = self.footer_html();
        let (class, html) = self.container();

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/css/style.css">
</head>
<body>
<header class="site-header">
<a class="site-title" href="#home">{title}</a>
<button id="mobile-menu-toggle" aria-label="Toggle navigation">&#9776;</button>
{nav}
</header>
<main id="content" class="{class}">{html}</main>
{footer}
{extra}</body>
</html>
"##,
            title = html_escape(&self.title),
            nav = nav,
            class = html_escape(&class),
            html = html,
            footer = footer,
            extra = self.extra_body,
        )
    }
}

impl Presenter for HtmlShell {
    fn display(&self, html: &str, page_class: &str) {
        let mut state = self.state.lock();
        state.container_html = html.to_string();
        state.container_class = page_class.to_string();
    }

    fn populate_nav(&self, entries: &[NavEntry]) {
        self.state.lock().nav = entries.to_vec();
    }

    fn populate_footer(&self, social: &[SocialLink]) {
        self.state.lock().social = social.to_vec();
    }

    fn set_active_nav(&self, page: &str) {
        self.state.lock().active = Some(page.to_string());
    }
}
