//! Content module - front-matter, markdown, transports and loading

mod frontmatter;
pub mod loader;
mod markdown;
mod models;
pub mod transport;

pub use frontmatter::{FrontMatter, MetaValue, DELIMITER};
pub use loader::{ContentLoader, LoadError};
pub use markdown::MarkdownRenderer;
pub use models::{
    BlogIndex, ListingIndex, MarkdownDoc, PostSummary, ProjectIndex, ProjectSummary,
    Publication, Publications,
};
pub use transport::{FsTransport, MemoryTransport, Transport, TransportError};
