//! Fragment router
//!
//! Locations look like `#<page>` or `#<page>/<slug>`. Resolution turns a
//! fragment into a [`Route`]; dispatch turns a route into the [`PageKind`]
//! that knows how to render it.

pub mod navigator;

pub use navigator::{AppState, NavPhase, NavigationOutcome, Navigator};

/// A parsed location fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub page: String,
    pub slug: Option<String>,
}

impl Route {
    pub fn new(page: impl Into<String>, slug: Option<String>) -> Self {
        Self {
            page: page.into(),
            slug,
        }
    }

    /// Render back to fragment form (`#projects/demo`)
    pub fn fragment(&self) -> String {
        match &self.slug {
            Some(slug) => format!("#{}/{}", self.page, slug),
            None => format!("#{}", self.page),
        }
    }
}

/// Resolve a location fragment, with or without its leading `#`.
///
/// Only one slug segment is kept: `#blog/a/b` resolves to page `blog`, slug `a`.
pub fn resolve_route(fragment: &str, default_page: &str) -> Route {
    let hash = fragment.strip_prefix('#').unwrap_or(fragment);
    if hash.is_empty() {
        return Route::new(default_page, None);
    }

    let mut parts = hash.split('/');
    let page = parts.next().unwrap_or_default();
    let slug = parts.next().map(str::to_string);
    Route::new(page, slug)
}

/// What a route renders as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Home,
    About,
    ProjectList,
    Project(String),
    Publications,
    BlogList,
    Post(String),
    NotFound(String),
}

impl PageKind {
    /// CSS class applied to the content container
    pub fn page_class(&self) -> &'static str {
        match self {
            PageKind::Home => "page-home",
            PageKind::About => "page-about",
            PageKind::ProjectList => "page-projects",
            PageKind::Project(_) => "page-project",
            PageKind::Publications => "page-publications",
            PageKind::BlogList => "page-blog",
            PageKind::Post(_) => "page-post",
            PageKind::NotFound(_) => "page-404",
        }
    }
}

/// Map a route to its page. Total: unknown pages become [`PageKind::NotFound`].
///
/// Any slug, even an empty one (`#blog/`), selects the detail page.
pub fn dispatch(route: &Route) -> PageKind {
    match (route.page.as_str(), route.slug.as_deref()) {
        ("home", _) => PageKind::Home,
        ("about", _) => PageKind::About,
        ("projects", None) => PageKind::ProjectList,
        ("projects", Some(slug)) => PageKind::Project(slug.to_string()),
        ("publications", _) => PageKind::Publications,
        ("blog", None) => PageKind::BlogList,
        ("blog", Some(slug)) => PageKind::Post(slug.to_string()),
        (page, _) => PageKind::NotFound(page.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_empty_uses_default() {
        assert_eq!(resolve_route("", "home"), Route::new("home", None));
        assert_eq!(resolve_route("#", "about"), Route::new("about", None));
    }

    #[test]
    fn test_resolve_page_and_slug() {
        assert_eq!(
            resolve_route("#projects/my-project", "home"),
            Route::new("projects", Some("my-project".to_string()))
        );
        assert_eq!(
            resolve_route("projects/my-project", "home"),
            Route::new("projects", Some("my-project".to_string()))
        );
        assert_eq!(resolve_route("#unknown", "home"), Route::new("unknown", None));
    }

    #[test]
    fn test_resolve_ignores_extra_segments() {
        assert_eq!(
            resolve_route("#blog/first/second", "home"),
            Route::new("blog", Some("first".to_string()))
        );
        assert_eq!(
            resolve_route("#blog/", "home"),
            Route::new("blog", Some(String::new()))
        );
    }

    #[test]
    fn test_fragment_round_trip() {
        let route = Route::new("blog", Some("hello".to_string()));
        assert_eq!(route.fragment(), "#blog/hello");
        assert_eq!(resolve_route(&route.fragment(), "home"), route);
    }

    #[test]
    fn test_dispatch_known_pages() {
        let cases = [
            ("#home", PageKind::Home),
            ("#about", PageKind::About),
            ("#projects", PageKind::ProjectList),
            ("#projects/demo", PageKind::Project("demo".to_string())),
            ("#publications", PageKind::Publications),
            ("#blog", PageKind::BlogList),
            ("#blog/hello", PageKind::Post("hello".to_string())),
            ("#blog/", PageKind::Post(String::new())),
            ("#projects/", PageKind::Project(String::new())),
            ("#about/ignored", PageKind::About),
        ];
        for (fragment, expected) in cases {
            assert_eq!(dispatch(&resolve_route(fragment, "home")), expected, "{}", fragment);
        }
    }

    #[test]
    fn test_dispatch_is_total() {
        for fragment in ["#unknown", "#/x", "#Projects", "#404/a/b", "#%20"] {
            let kind = dispatch(&resolve_route(fragment, "home"));
            assert!(matches!(kind, PageKind::NotFound(_)), "{}", fragment);
            assert_eq!(kind.page_class(), "page-404");
        }
    }
}
