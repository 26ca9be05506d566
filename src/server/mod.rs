//! Development server with live reload
//!
//! `/` serves the shell page. The shell forwards its location fragment to
//! `/__route/<fragment>` and swaps the returned HTML into the container.

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use parking_lot::RwLock;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::loader::SITE_CONFIG_FILE;
use crate::render::Rendered;
use crate::router::Navigator;
use crate::shell::{HtmlShell, Presenter};
use crate::Folio;

/// Forwards `location.hash` to the route endpoint and applies the result.
/// Responses for anything but the latest request are dropped.
const SHELL_SCRIPT: &str = r#"<script>
(function() {
    var content = document.getElementById('content');
    var nav = document.getElementById('main-nav');
    var latest = 0;
    function navigate() {
        var hash = location.hash.replace(/^#/, '');
        var seq = ++latest;
        fetch(hash ? '/__route/' + hash : '/__route')
            .then(function(r) { return r.json(); })
            .then(function(page) {
                if (seq !== latest) { return; }
                content.className = page.page_class;
                content.innerHTML = page.html;
                nav.querySelectorAll('.nav-link').forEach(function(a) {
                    a.classList.toggle('active', a.dataset.page === page.page);
                });
                window.scrollTo(0, 0);
            });
    }
    document.getElementById('mobile-menu-toggle').addEventListener('click', function() {
        nav.classList.toggle('open');
    });
    nav.addEventListener('click', function() { nav.classList.remove('open'); });
    window.addEventListener('hashchange', navigate);
    navigate();
})();
</script>
"#;

/// Live reload client
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
"#;

/// Server state
struct ServerState {
    folio: Folio,
    /// Swapped out when `site.json` changes
    navigator: RwLock<Arc<Navigator>>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    fn navigator(&self) -> Arc<Navigator> {
        self.navigator.read().clone()
    }
}

/// Body of `/__route` responses
#[derive(Debug, Serialize)]
struct RouteResponse {
    page: String,
    page_class: &'static str,
    html: String,
}

async fn build_navigator(folio: &Folio) -> Arc<Navigator> {
    // Route responses are returned as JSON; this shell is never shown
    let shell = Arc::new(HtmlShell::new(&folio.config.title));
    Arc::new(folio.navigator(shell).await)
}

/// Build the application router
async fn app(folio: &Folio, live_reload: bool) -> (Router, Arc<ServerState>) {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        folio: folio.clone(),
        navigator: RwLock::new(build_navigator(folio).await),
        reload_tx,
        live_reload,
    });

    let router = Router::new()
        .route("/", get(shell_handler))
        .route("/__route", get(route_handler))
        .route("/__route/*fragment", get(route_handler))
        .route("/__livereload", get(livereload_handler))
        .fallback_service(ServeDir::new(&folio.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    (router, state)
}

/// Start the development server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let (app, state) = app(folio, watch).await;

    if state.navigator().startup_failed() {
        tracing::warn!(
            "No usable {} in {:?}; pages will render without navigation",
            SITE_CONFIG_FILE,
            folio.content_dir
        );
    }

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_and_reload(state).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch content and static files; reload clients on change
async fn watch_and_reload(state: Arc<ServerState>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<DebounceEventResult>();

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            let _ = tx.send(res);
        },
    )?;

    for dir in [&state.folio.content_dir, &state.folio.static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }

    while let Some(result) = rx.recv().await {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let relevant: Vec<_> = events
            .iter()
            .filter(|e| {
                let path_str = e.path.to_string_lossy();
                !path_str.contains(".git")
                    && !path_str.contains(".DS_Store")
                    && !path_str.ends_with('~')
            })
            .collect();
        if relevant.is_empty() {
            continue;
        }

        for event in &relevant {
            tracing::info!("File changed: {}", event.path.display());
        }

        let site_changed = relevant
            .iter()
            .any(|e| e.path.file_name().is_some_and(|name| name == SITE_CONFIG_FILE));
        if site_changed {
            tracing::info!("Reloading {}", SITE_CONFIG_FILE);
            let navigator = build_navigator(&state.folio).await;
            *state.navigator.write() = navigator;
        }

        // No receivers just means no open pages
        let _ = state.reload_tx.send(());
    }

    Ok(())
}

/// The shell page with an empty container
async fn shell_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    let navigator = state.navigator();

    let mut shell = HtmlShell::new(&state.folio.config.title).with_body_script(SHELL_SCRIPT);
    if state.live_reload {
        shell = shell.with_body_script(LIVE_RELOAD_SCRIPT);
    }
    shell.populate_nav(&navigator.site().nav);
    shell.populate_footer(&navigator.site().social);
    if navigator.startup_failed() {
        let view = Rendered::startup_error();
        shell.display(&view.html, view.page_class);
    }

    Html(shell.document())
}

/// Run one navigation for the fragment after `/__route/`
async fn route_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    // The raw path keeps slugs exactly as written in the fragment
    let fragment = route_fragment(uri.path());
    let outcome = state.navigator().navigate(fragment).await;

    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    let body = RouteResponse {
        page: outcome.route.page,
        page_class: outcome.rendered.page_class,
        html: outcome.rendered.html,
    };
    (status, Json(body)).into_response()
}

fn route_fragment(path: &str) -> &str {
    path.strip_prefix("/__route")
        .unwrap_or_default()
        .trim_start_matches('/')
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
