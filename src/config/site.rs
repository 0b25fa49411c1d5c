//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Author used when neither the caller nor the configuration names one
pub const FALLBACK_AUTHOR: &str = "Admin";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    /// Owner of the site; the default author for new posts
    pub full_name: String,
    pub email: String,
    pub language: String,

    // URL
    /// Public base URL used for canonical links. Empty means "derive from the request".
    pub site_url: String,
    pub root: String,
    pub blog_dir: String,
    pub project_dir: String,

    // Directory
    pub source_dir: String,

    // Listing
    pub per_page: usize,
    pub page_window: usize,
    pub related_posts: usize,

    // Writing
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            tagline: String::new(),
            description: String::new(),
            full_name: String::new(),
            email: String::new(),
            language: "en".to_string(),

            site_url: String::new(),
            root: "/".to_string(),
            blog_dir: "blog".to_string(),
            project_dir: "projects".to_string(),

            source_dir: "source".to_string(),

            per_page: 4,
            page_window: 5,
            related_posts: 3,

            date_format: "%Y-%m-%d".to_string(),
            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config.sanitized())
    }

    /// The author to record when the caller did not supply one
    pub fn default_author(&self) -> &str {
        let name = self.full_name.trim();
        if name.is_empty() {
            FALLBACK_AUTHOR
        } else {
            name
        }
    }

    /// Resolve an explicitly requested author against the configured default
    pub fn resolve_author(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| self.default_author())
            .to_string()
    }

    /// Zero sizes would make every listing degenerate; fall back to defaults.
    fn sanitized(mut self) -> Self {
        let defaults = SiteConfig::default();
        if self.per_page == 0 {
            tracing::warn!("per_page must be positive, using {}", defaults.per_page);
            self.per_page = defaults.per_page;
        }
        if self.page_window == 0 {
            tracing::warn!("page_window must be positive, using {}", defaults.page_window);
            self.page_window = defaults.page_window;
        }
        self
    }
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Folio");
        assert_eq!(config.per_page, 4);
        assert_eq!(config.page_window, 5);
        assert_eq!(config.related_posts, 3);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
full_name: Ada Lovelace
site_url: https://ada.example.com/
per_page: 6
highlight:
  line_number: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.full_name, "Ada Lovelace");
        assert_eq!(config.per_page, 6);
        assert_eq!(config.page_window, 5);
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_default_author() {
        let mut config = SiteConfig::default();
        assert_eq!(config.default_author(), "Admin");
        config.full_name = "  Ada Lovelace ".to_string();
        assert_eq!(config.default_author(), "Ada Lovelace");
        assert_eq!(config.resolve_author(None), "Ada Lovelace");
        assert_eq!(config.resolve_author(Some("  ")), "Ada Lovelace");
        assert_eq!(config.resolve_author(Some("Grace")), "Grace");
    }

    #[test]
    fn test_load_sanitizes_zero_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "per_page: 0\npage_window: 0\n").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.per_page, 4);
        assert_eq!(config.page_window, 5);
    }
}
