//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // Content
    pub posts_dir: String,

    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub roots: RootsConfig,
    #[serde(default)]
    pub home: HomeConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "System & Device".to_string(),
            subtitle: "Notes on systems, devices and tools".to_string(),
            description: String::new(),
            author: "lztyblog".to_string(),
            language: "en".to_string(),

            posts_dir: "content/posts".to_string(),

            server: ServerConfig::default(),
            github: GithubConfig::default(),
            roots: RootsConfig::default(),
            home: HomeConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        config.github.apply_env();
        Ok(config)
    }
}

/// HTTP server binding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// Upstream GitHub repository served by the file browser
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Base URL of the REST API
    pub api_url: String,
    /// Base URL of the raw-content CDN
    pub raw_url: String,
    pub user_agent: String,
    /// Optional API token, falls back to `$GITHUB_TOKEN`
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: "lztyblog".to_string(),
            repo: "System-and-Device".to_string(),
            branch: "main".to_string(),
            api_url: "https://api.github.com".to_string(),
            raw_url: "https://raw.githubusercontent.com".to_string(),
            user_agent: concat!("sysdev-site/", env!("CARGO_PKG_VERSION")).to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl GithubConfig {
    /// Fill the token from the environment when the config leaves it out
    pub fn apply_env(&mut self) {
        if self.token.is_none() {
            self.token = std::env::var("GITHUB_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty());
        }
    }

    /// Contents API URL for a repo-relative path at the configured branch
    pub fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            path,
            self.branch
        )
    }

    /// Raw CDN URL for a repo-relative path at the configured branch
    pub fn raw_file_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch,
            path
        )
    }
}

/// Repo-relative directories behind each root key.
///
/// These are also the only prefixes the download proxy will fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RootsConfig {
    pub download: String,
    pub blog: String,
}

impl Default for RootsConfig {
    fn default() -> Self {
        Self {
            download: "web/content/download".to_string(),
            blog: "web/content/posts".to_string(),
        }
    }
}

impl RootsConfig {
    /// Allowed download prefixes, without trailing slashes
    pub fn allow_prefixes(&self) -> [&str; 2] {
        [
            self.download.trim_end_matches('/'),
            self.blog.trim_end_matches('/'),
        ]
    }
}

/// Home page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub post_count: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self { post_count: 5 }
    }
}
