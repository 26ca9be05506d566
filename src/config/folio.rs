//! Project configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Document title for the shell page
    pub title: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,

    // Routing
    pub default_route: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            default_route: "home".to_string(),
            highlight: HighlightConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl FolioConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: FolioConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
    pub live_reload: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
            live_reload: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.default_route, "home");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Ada's Portfolio
content_dir: site-content
default_route: about
server:
  port: 8080
"#;
        let config: FolioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Ada's Portfolio");
        assert_eq!(config.content_dir, "site-content");
        assert_eq!(config.default_route, "about");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "static_dir: public\n").unwrap();
        let config = FolioConfig::load(&path).unwrap();
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.content_dir, "content");
    }
}
