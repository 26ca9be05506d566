//! Content transport - where raw content files come from
//!
//! Paths are always relative to a content root (`projects/_index.json`,
//! `blog/hello.md`). Anything that tries to escape the root is rejected.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Transport failures
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid content path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches UTF-8 content by relative path
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch_text(&self, path: &str) -> Result<String, TransportError>;
}

/// Reads content from a directory on disk
#[derive(Debug, Clone)]
pub struct FsTransport {
    root: PathBuf,
}

impl FsTransport {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl Transport for FsTransport {
    async fn fetch_text(&self, path: &str) -> Result<String, TransportError> {
        let relative = validate_path(path)?;
        let full_path = self.root.join(relative);
        tracing::debug!("Fetching {:?}", full_path);

        match tokio::fs::read_to_string(&full_path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TransportError::NotFound(path.to_string()))
            }
            Err(e) => Err(TransportError::Io(e)),
        }
    }
}

/// Serves content from memory
#[derive(Debug, Default)]
pub struct MemoryTransport {
    files: RwLock<HashMap<String, String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&self, path: impl Into<String>, content: impl Into<String>) {
        self.files.write().insert(path.into(), content.into());
    }

    /// Builder-style variant of [`MemoryTransport::insert`]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn remove(&self, path: &str) -> Option<String> {
        self.files.write().remove(path)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn fetch_text(&self, path: &str) -> Result<String, TransportError> {
        validate_path(path)?;
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| TransportError::NotFound(path.to_string()))
    }
}

/// Accept only plain relative paths made of normal components
fn validate_path(path: &str) -> Result<&Path, TransportError> {
    let relative = Path::new(path);
    let is_plain = !path.is_empty()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

    if is_plain {
        Ok(relative)
    } else {
        Err(TransportError::InvalidPath(path.to_string()))
    }
}
