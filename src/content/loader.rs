//! Content loader - fetches content files and turns them into renderable data

use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

use super::transport::{Transport, TransportError};
use super::{FrontMatter, MarkdownDoc, MarkdownRenderer};
use crate::config::SiteConfig;

/// Site configuration file under the content root
pub const SITE_CONFIG_FILE: &str = "site.json";

/// Failures while loading content for a page
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch {path}: {source}")]
    Transport {
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No page for route: {0}")]
    NotFound(String),
}

/// Loads content through a [`Transport`]
pub struct ContentLoader {
    transport: Arc<dyn Transport>,
    markdown: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(transport: Arc<dyn Transport>, markdown: MarkdownRenderer) -> Self {
        Self {
            transport,
            markdown,
        }
    }

    pub fn markdown(&self) -> &MarkdownRenderer {
        &self.markdown
    }

    /// Fetch a file as text
    pub async fn load_text(&self, path: &str) -> Result<String, LoadError> {
        self.transport
            .fetch_text(path)
            .await
            .map_err(|source| LoadError::Transport {
                path: path.to_string(),
                source,
            })
    }

    /// Fetch a markdown file, split off its front-matter and render the body
    pub async fn load_markdown(&self, path: &str) -> Result<MarkdownDoc, LoadError> {
        let raw = self.load_text(path).await?;
        let FrontMatter { meta, body } = FrontMatter::parse(&raw);
        tracing::debug!("Loaded {} ({} front-matter fields)", path, meta.len());

        Ok(MarkdownDoc {
            meta,
            html: self.markdown.render(&body),
        })
    }

    /// Fetch and deserialize a JSON file
    pub async fn load_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LoadError> {
        let raw = self.load_text(path).await?;
        serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Load `site.json`
    pub async fn load_site_config(&self) -> Result<SiteConfig, LoadError> {
        self.load_json(SITE_CONFIG_FILE).await
    }
}
