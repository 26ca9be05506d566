//! folio-rs: a small portfolio site renderer
//!
//! Content lives in plain files (markdown with a minimal front-matter dialect,
//! plus a few JSON index files). Pages are addressed by URL fragment routes such
//! as `#projects/my-project` and rendered on demand into a single container.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod render;
pub mod router;
pub mod server;
pub mod shell;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use content::{ContentLoader, FsTransport, MarkdownRenderer, Transport};
use render::PageRenderer;
use router::Navigator;
use shell::Presenter;

/// Project configuration file name
pub const CONFIG_FILE: &str = "_config.yml";

/// The main application
#[derive(Clone)]
pub struct Folio {
    /// Project configuration
    pub config: config::FolioConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content root
    pub content_dir: std::path::PathBuf,
    /// Static assets served alongside the shell
    pub static_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::FolioConfig::load(&config_path)?
        } else {
            config::FolioConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            static_dir,
        })
    }

    /// Transport reading from the content directory
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(FsTransport::new(&self.content_dir))
    }

    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(
            self.transport(),
            MarkdownRenderer::from_config(&self.config.highlight),
        )
    }

    /// Load the site configuration and set up a navigator for `presenter`
    pub async fn navigator(&self, presenter: Arc<dyn Presenter>) -> Navigator {
        Navigator::init(
            PageRenderer::new(self.loader()),
            presenter,
            &self.config.default_route,
        )
        .await
    }
}
