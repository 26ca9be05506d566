//! Navigation state machine
//!
//! Every navigation moves through `Loading` and ends `Rendered` or `Failed`.
//! Navigations may overlap; each one takes a sequence number and its output is
//! shown only if nothing newer has been shown already.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{dispatch, resolve_route, PageKind, Route};
use crate::config::SiteConfig;
use crate::render::{PageRenderer, Rendered};
use crate::shell::Presenter;

/// Where the most recent navigation stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    Loading,
    Rendered,
    Failed,
}

/// Session state shared by all navigations
#[derive(Debug)]
pub struct AppState {
    site: Arc<SiteConfig>,
    default_route: String,
    startup_failed: bool,
    location: Mutex<String>,
    current_route: Mutex<Option<Route>>,
    phase: Mutex<NavPhase>,
    /// Sequence number of the most recently started navigation
    started: AtomicU64,
    /// Sequence number of the navigation currently on display
    displayed: Mutex<u64>,
}

impl AppState {
    pub fn new(site: Arc<SiteConfig>, default_route: impl Into<String>) -> Self {
        Self {
            site,
            default_route: default_route.into(),
            startup_failed: false,
            location: Mutex::new(String::new()),
            current_route: Mutex::new(None),
            phase: Mutex::new(NavPhase::Idle),
            started: AtomicU64::new(0),
            displayed: Mutex::new(0),
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn default_route(&self) -> &str {
        &self.default_route
    }
}

/// Result of one navigation
#[derive(Debug, Clone)]
pub struct NavigationOutcome {
    pub sequence: u64,
    pub route: Route,
    pub kind: PageKind,
    pub rendered: Rendered,
    /// `Rendered` or `Failed`
    pub phase: NavPhase,
    /// False when a newer navigation was already on display
    pub displayed: bool,
    pub error: Option<String>,
}

impl NavigationOutcome {
    pub fn is_success(&self) -> bool {
        self.phase == NavPhase::Rendered
    }
}

/// Drives routing, rendering and display for one session
pub struct Navigator {
    state: AppState,
    renderer: PageRenderer,
    presenter: Arc<dyn Presenter>,
}

impl Navigator {
    /// Build a navigator around an already-loaded site configuration
    pub fn new(
        site: Arc<SiteConfig>,
        default_route: &str,
        renderer: PageRenderer,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        presenter.populate_nav(&site.nav);
        presenter.populate_footer(&site.social);

        Self {
            state: AppState::new(site, default_route),
            renderer,
            presenter,
        }
    }

    /// Load `site.json` and set up the shell.
    ///
    /// If the site configuration cannot be loaded the presenter shows the
    /// startup error view; navigation still works with an empty configuration.
    pub async fn init(
        renderer: PageRenderer,
        presenter: Arc<dyn Presenter>,
        default_route: &str,
    ) -> Self {
        let loaded = renderer.loader().load_site_config().await;
        match loaded {
            Ok(site) => {
                tracing::debug!(
                    "Loaded site configuration ({} nav entries, {} social links)",
                    site.nav.len(),
                    site.social.len()
                );
                Self::new(Arc::new(site), default_route, renderer, presenter)
            }
            Err(e) => {
                tracing::warn!("Failed to load site configuration: {}", e);
                let view = Rendered::startup_error();
                presenter.display(&view.html, view.page_class);

                let mut navigator = Self::new(
                    Arc::new(SiteConfig::default()),
                    default_route,
                    renderer,
                    presenter,
                );
                navigator.state.startup_failed = true;
                *navigator.state.phase.lock() = NavPhase::Failed;
                navigator
            }
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn site(&self) -> &SiteConfig {
        self.state.site()
    }

    pub fn startup_failed(&self) -> bool {
        self.state.startup_failed
    }

    pub fn phase(&self) -> NavPhase {
        *self.state.phase.lock()
    }

    pub fn current_route(&self) -> Option<Route> {
        self.state.current_route.lock().clone()
    }

    /// The current location fragment
    pub fn location(&self) -> String {
        self.state.location.lock().clone()
    }

    /// Set the location and navigate to it
    pub async fn navigate(&self, target: &str) -> NavigationOutcome {
        *self.state.location.lock() = target.to_string();
        self.handle_location_change().await
    }

    /// Navigate to whatever the location currently is
    pub async fn handle_location_change(&self) -> NavigationOutcome {
        let fragment = self.location();
        self.run(&fragment).await
    }

    async fn run(&self, fragment: &str) -> NavigationOutcome {
        let sequence = self.state.started.fetch_add(1, Ordering::SeqCst) + 1;
        let route = resolve_route(fragment, &self.state.default_route);
        let kind = dispatch(&route);
        tracing::debug!("Navigation #{} to {} -> {:?}", sequence, route.fragment(), kind);

        *self.state.current_route.lock() = Some(route.clone());
        *self.state.phase.lock() = NavPhase::Loading;
        self.presenter.set_active_nav(&route.page);

        let (rendered, phase, error) = match self.renderer.render(&kind, self.site()).await {
            Ok(rendered) => (rendered, NavPhase::Rendered, None),
            Err(e) => {
                tracing::warn!("Navigation to {} failed: {}", route.fragment(), e);
                (Rendered::not_found(), NavPhase::Failed, Some(e.to_string()))
            }
        };

        let displayed = self.commit(sequence, &rendered, phase);

        NavigationOutcome {
            sequence,
            route,
            kind,
            rendered,
            phase,
            displayed,
            error,
        }
    }

    /// Show a finished navigation unless something newer is already showing
    fn commit(&self, sequence: u64, rendered: &Rendered, phase: NavPhase) -> bool {
        let mut displayed = self.state.displayed.lock();
        if sequence <= *displayed {
            tracing::debug!(
                "Discarding stale navigation #{} (#{} is on display)",
                sequence,
                *displayed
            );
            return false;
        }

        *displayed = sequence;
        self.presenter.display(&rendered.html, rendered.page_class);
        self.presenter.scroll_to_top();

        // An older navigation finishing first leaves the newest one Loading
        if sequence == self.state.started.load(Ordering::SeqCst) {
            *self.state.phase.lock() = phase;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NavEntry, SocialLink};
    use crate::content::{
        ContentLoader, MarkdownRenderer, MemoryTransport, Transport, TransportError,
    };
    use async_trait::async_trait;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingPresenter {
        displays: Mutex<Vec<(String, String)>>,
        nav: Mutex<Vec<NavEntry>>,
        footer: Mutex<Vec<SocialLink>>,
        active: Mutex<Option<String>>,
    }

    impl RecordingPresenter {
        fn last_display(&self) -> (String, String) {
            self.displays.lock().last().cloned().unwrap_or_default()
        }
    }

    impl Presenter for RecordingPresenter {
        fn display(&self, html: &str, page_class: &str) {
            self.displays
                .lock()
                .push((page_class.to_string(), html.to_string()));
        }

        fn populate_nav(&self, entries: &[NavEntry]) {
            *self.nav.lock() = entries.to_vec();
        }

        fn populate_footer(&self, social: &[SocialLink]) {
            *self.footer.lock() = social.to_vec();
        }

        fn set_active_nav(&self, page: &str) {
            *self.active.lock() = Some(page.to_string());
        }
    }

    /// Holds fetches of one path until released
    struct GatedTransport {
        inner: MemoryTransport,
        gated_path: String,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn fetch_text(&self, path: &str) -> Result<String, TransportError> {
            if path == self.gated_path {
                self.entered.notify_one();
                self.release.notified().await;
            }
            self.inner.fetch_text(path).await
        }
    }

    fn content() -> MemoryTransport {
        MemoryTransport::new()
            .with_file(
                "site.json",
                r##"{
                    "nav": [{"href": "#home", "label": "Home"}, {"href": "#about", "label": "About"}],
                    "social": [{"platform": "github", "url": "https://github.com/me", "label": "GitHub"}],
                    "contact": {"email": "me@example.com"}
                }"##,
            )
            .with_file("home.md", "# Welcome")
            .with_file("about.md", "---\ntitle: About\n---\nAbout me")
            .with_file("projects/_index.json", "{ broken")
    }

    fn renderer(transport: Arc<dyn Transport>) -> PageRenderer {
        PageRenderer::new(ContentLoader::new(transport, MarkdownRenderer::new()))
    }

    async fn navigator(transport: Arc<dyn Transport>) -> (Navigator, Arc<RecordingPresenter>) {
        let presenter = Arc::new(RecordingPresenter::default());
        let navigator = Navigator::init(renderer(transport), presenter.clone(), "home").await;
        (navigator, presenter)
    }

    #[tokio::test]
    async fn test_init_populates_shell() {
        let (navigator, presenter) = navigator(Arc::new(content())).await;
        assert!(!navigator.startup_failed());
        assert_eq!(navigator.phase(), NavPhase::Idle);
        assert_eq!(navigator.current_route(), None);
        assert_eq!(presenter.nav.lock().len(), 2);
        assert_eq!(presenter.footer.lock()[0].platform, "github");
        assert_eq!(
            navigator.site().contact_field("email").as_deref(),
            Some("me@example.com")
        );
    }

    #[tokio::test]
    async fn test_navigate_renders_page() {
        let (navigator, presenter) = navigator(Arc::new(content())).await;

        let outcome = navigator.navigate("#about").await;
        assert!(outcome.is_success());
        assert!(outcome.displayed);
        assert_eq!(outcome.kind, PageKind::About);
        assert_eq!(navigator.phase(), NavPhase::Rendered);
        assert_eq!(navigator.location(), "#about");
        assert_eq!(presenter.active.lock().as_deref(), Some("about"));

        let (class, html) = presenter.last_display();
        assert_eq!(class, "page-about");
        assert!(html.contains("About me"));
    }

    #[tokio::test]
    async fn test_empty_location_uses_default_route() {
        let (navigator, presenter) = navigator(Arc::new(content())).await;
        let outcome = navigator.handle_location_change().await;
        assert_eq!(outcome.route, Route::new("home", None));
        assert!(presenter.last_display().1.contains("Welcome"));
    }

    #[tokio::test]
    async fn test_failures_show_not_found() {
        let (navigator, presenter) = navigator(Arc::new(content())).await;
        let not_found = Rendered::not_found();

        // Unknown page, missing file, malformed JSON, empty slug
        for target in ["#nowhere", "#blog/missing", "#projects", "#blog/"] {
            let outcome = navigator.navigate(target).await;
            assert_eq!(outcome.phase, NavPhase::Failed, "{}", target);
            assert!(outcome.error.is_some());
            assert_eq!(navigator.phase(), NavPhase::Failed);
            assert_eq!(
                presenter.last_display(),
                (not_found.page_class.to_string(), not_found.html.clone())
            );
        }
    }

    #[tokio::test]
    async fn test_startup_failure_shows_error_view() {
        let transport = content();
        transport.remove("site.json");
        let (navigator, presenter) = navigator(Arc::new(transport)).await;

        assert!(navigator.startup_failed());
        assert_eq!(navigator.phase(), NavPhase::Failed);
        assert!(presenter.nav.lock().is_empty());
        assert_eq!(presenter.last_display().0, "page-error");

        // Pages that do not need site.json still render
        assert!(navigator.navigate("#home").await.is_success());
    }

    #[tokio::test]
    async fn test_stale_navigation_is_discarded() {
        let transport = Arc::new(GatedTransport {
            inner: content(),
            gated_path: "about.md".to_string(),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let (navigator, presenter) = navigator(transport.clone()).await;
        let navigator = Arc::new(navigator);

        let slow = {
            let navigator = navigator.clone();
            tokio::spawn(async move { navigator.navigate("#about").await })
        };
        transport.entered.notified().await;
        assert_eq!(navigator.phase(), NavPhase::Loading);

        let fast = navigator.navigate("#home").await;
        assert!(fast.displayed);
        assert_eq!(navigator.phase(), NavPhase::Rendered);

        transport.release.notify_one();
        let slow = slow.await.unwrap();
        assert!(slow.is_success());
        assert!(slow.sequence < fast.sequence);
        assert!(!slow.displayed);

        assert_eq!(presenter.displays.lock().len(), 1);
        assert!(presenter.last_display().1.contains("Welcome"));
        assert_eq!(navigator.current_route(), Some(Route::new("home", None)));
        assert_eq!(navigator.phase(), NavPhase::Rendered);
    }

    #[tokio::test]
    async fn test_older_result_shown_while_newer_loading() {
        let transport = Arc::new(GatedTransport {
            inner: content(),
            gated_path: "home.md".to_string(),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let (navigator, presenter) = navigator(transport.clone()).await;
        let navigator = Arc::new(navigator);

        let about = navigator.navigate("#about").await;
        assert!(about.displayed);

        let slow = {
            let navigator = navigator.clone();
            tokio::spawn(async move { navigator.navigate("#home").await })
        };
        transport.entered.notified().await;
        assert_eq!(navigator.phase(), NavPhase::Loading);
        assert_eq!(presenter.last_display().0, "page-about");

        transport.release.notify_one();
        let home = slow.await.unwrap();
        assert!(home.displayed);
        assert_eq!(presenter.last_display().0, "page-home");
    }
}
