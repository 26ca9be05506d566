//! Configuration module

mod folio;
mod site;

pub use folio::FolioConfig;
pub use folio::HighlightConfig;
pub use folio::ServerConfig;
pub use site::NavEntry;
pub use site::SiteConfig;
pub use site::SocialLink;
