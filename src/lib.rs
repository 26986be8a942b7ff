//! sysdev-site: a personal blog and notes site with a GitHub-backed file library
//!
//! Pages are rendered on request from Tera templates embedded in the binary.
//! Posts come from markdown files on disk, notes from an in-memory catalog,
//! and the file library proxies the GitHub Contents API and raw CDN.

pub mod browser;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod github;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site rooted at a directory holding `_config.yml`
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts directory
    pub posts_dir: PathBuf,
}

impl Site {
    /// Load a site from a directory; a missing `_config.yml` means defaults
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            let mut config = config::SiteConfig::default();
            config.github.apply_env();
            config
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<()> {
        commands::new::create_post(self, title, slug).map(|_| ())
    }
}
