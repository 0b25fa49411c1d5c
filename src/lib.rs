//! folio: content backend for a personal website
//!
//! Loads blog posts and portfolio projects from markdown files, renders
//! markdown with embedded LaTeX math without mangling it, and assembles
//! faceted, paginated listings as serializable view models.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod views;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::loader::ContentLoader;
use content::{ContentStore, MarkdownRenderer};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// The main folio application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    /// Directory holding post files
    pub fn posts_dir(&self) -> PathBuf {
        self.source_dir.join("_posts")
    }

    /// Directory holding project files
    pub fn projects_dir(&self) -> PathBuf {
        self.source_dir.join("_projects")
    }

    /// Declared categories and tags
    pub fn taxonomy_path(&self) -> PathBuf {
        self.source_dir.join("_data").join("taxonomy.yml")
    }

    /// Load every post, project and facet from disk
    pub fn load_store(&self) -> Result<ContentStore> {
        ContentLoader::new(self).load()
    }

    /// Markdown renderer configured from the site settings
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::with_options(&self.config.highlight)
    }
}
