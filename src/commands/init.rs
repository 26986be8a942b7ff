//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Site
title: System & Device
subtitle: Notes on systems, devices and tools
description: ''
author: lztyblog
language: en

# Content
posts_dir: content/posts

# Server
server:
  ip: localhost
  port: 3000

# GitHub repository backing the file library
github:
  owner: lztyblog
  repo: System-and-Device
  branch: main
  api_url: https://api.github.com
  raw_url: https://raw.githubusercontent.com
  user_agent: sysdev-site
  # token: falls back to $GITHUB_TOKEN
  timeout_secs: 30

# Library roots (also the download allow-list)
roots:
  download: web/content/download
  blog: web/content/posts

# Home page
home:
  post_count: 5
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    let posts_dir = target_dir.join("content/posts");
    fs::create_dir_all(&posts_dir)?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
description: First post on the site
tags: [meta]
---

Welcome! Posts live in `content/posts/` as markdown files with a YAML header.

## Quick Start

### Create a new post

```bash
$ sysdev-site new "My New Post"
```

### Run server

```bash
$ sysdev-site serve
```

Then open <http://localhost:3000/download> to browse the file library.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(posts_dir.join("hello-world.md"), sample_post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_creates_loadable_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.github.repo, "System-and-Device");
        assert!(site.posts_dir.join("hello-world.md").is_file());

        let store = crate::content::PostStore::new(&site.posts_dir);
        let posts = store.list().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello World");
    }

    #[test]
    fn test_init_site_refuses_existing() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
