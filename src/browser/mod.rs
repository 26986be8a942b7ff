//! File browser view model
//!
//! Turns a root key, a sub-path and a listing response into everything the
//! `download.html` template needs: breadcrumbs, sorted entries and links.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::{GithubConfig, RootsConfig};
use crate::error::ApiError;
use crate::github::{parse_listing, Listing, RepoEntry};
use crate::helpers;

/// File name hidden from every listing
const GITKEEP: &str = ".gitkeep";

/// Logical browser root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RootKey {
    Download,
    Blog,
}

impl RootKey {
    pub const ALL: [RootKey; 2] = [RootKey::Download, RootKey::Blog];

    /// Unknown or missing values fall back to `Download`
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("blog") => RootKey::Blog,
            _ => RootKey::Download,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RootKey::Download => "download",
            RootKey::Blog => "blog",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RootKey::Download => "Downloads",
            RootKey::Blog => "Blog Files",
        }
    }

    /// Repo-relative directory this root maps to
    pub fn prefix<'a>(&self, roots: &'a RootsConfig) -> &'a str {
        match self {
            RootKey::Download => roots.download.trim_end_matches('/'),
            RootKey::Blog => roots.blog.trim_end_matches('/'),
        }
    }
}

/// Query string of the browser page
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub root: Option<String>,
    pub path: Option<String>,
}

/// Where the browser is pointed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub root: RootKey,
    /// Path below the root, without a leading slash
    pub sub_path: String,
    /// Repo-relative directory of the root
    pub root_path: String,
    /// Repo-relative directory to list
    pub repo_path: String,
}

impl Location {
    pub fn resolve(query: &BrowseQuery, roots: &RootsConfig) -> Self {
        let root = RootKey::from_query(query.root.as_deref());
        let sub_path = query
            .path
            .as_deref()
            .unwrap_or("")
            .trim_start_matches('/')
            .to_string();
        let root_path = root.prefix(roots).to_string();
        let repo_path = helpers::join_path(&root_path, &sub_path);

        Self {
            root,
            sub_path,
            root_path,
            repo_path,
        }
    }

    /// Path of a listing entry relative to this location's root
    pub fn relative_to_root<'a>(&self, entry_path: &'a str) -> &'a str {
        match entry_path.strip_prefix(self.root_path.as_str()) {
            Some(rest) => rest.trim_start_matches('/'),
            None => entry_path,
        }
    }
}

/// Browser page link for a root and sub-path
pub fn build_href(root: RootKey, path: &str) -> String {
    if path.is_empty() {
        format!("/download?root={}", root.as_str())
    } else {
        format!(
            "/download?root={}&path={}",
            root.as_str(),
            helpers::encode_component(path)
        )
    }
}

/// Download proxy link for a repo-relative file path
pub fn download_href(repo_path: &str) -> String {
    format!("/api/dl?path={}", helpers::encode_component(repo_path))
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub path: String,
    pub href: String,
}

/// Breadcrumbs from the root crumb down to `sub_path`
pub fn crumbs(root: RootKey, sub_path: &str) -> Vec<Crumb> {
    let mut out = vec![Crumb {
        label: "Library".to_string(),
        path: String::new(),
        href: build_href(root, ""),
    }];

    let mut current = String::new();
    for part in sub_path.split('/').filter(|p| !p.is_empty()) {
        current = helpers::join_path(&current, part);
        out.push(Crumb {
            label: part.to_string(),
            path: current.clone(),
            href: build_href(root, &current),
        });
    }

    out
}

fn by_name(a: &RepoEntry, b: &RepoEntry) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Directories first, then files, each alphabetical; `.gitkeep` and
/// entries that are neither files nor directories are dropped.
pub fn sort_entries(entries: Vec<RepoEntry>) -> Vec<RepoEntry> {
    let (mut dirs, rest): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .filter(|e| e.name != GITKEEP)
        .partition(RepoEntry::is_dir);
    let mut files: Vec<_> = rest.into_iter().filter(RepoEntry::is_file).collect();

    dirs.sort_by(by_name);
    files.sort_by(by_name);

    dirs.extend(files);
    dirs
}

/// One rendered row
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    /// Browser link for directories, download proxy link for files
    pub href: String,
    /// Raw CDN link, files only
    pub preview_href: Option<String>,
    pub size: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RootLink {
    pub key: RootKey,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Everything the browser template renders
#[derive(Debug, Clone, Serialize)]
pub struct BrowserView {
    pub root: RootKey,
    pub owner: String,
    pub repo: String,
    pub root_path: String,
    pub roots: Vec<RootLink>,
    pub crumbs: Vec<Crumb>,
    pub entries: Vec<EntryView>,
    pub count: usize,
    pub error: Option<String>,
}

impl BrowserView {
    pub fn build(
        location: &Location,
        listing: std::result::Result<Listing, ApiError>,
        github: &GithubConfig,
    ) -> Self {
        let (entries, error) = match listing {
            Ok(listing) => match parse_listing(&listing.body) {
                Some(entries) => (entries, None),
                None => (Vec::new(), Some(listing_error(&listing.body))),
            },
            Err(e) => (Vec::new(), Some(e.message())),
        };

        let entries: Vec<EntryView> = sort_entries(entries)
            .into_iter()
            .map(|entry| {
                if entry.is_dir() {
                    EntryView {
                        href: build_href(location.root, location.relative_to_root(&entry.path)),
                        preview_href: None,
                        size: String::new(),
                        is_dir: true,
                        name: entry.name,
                        path: entry.path,
                    }
                } else {
                    EntryView {
                        href: download_href(&entry.path),
                        preview_href: Some(github.raw_file_url(&helpers::encode_path(&entry.path))),
                        size: helpers::human_size(entry.size),
                        is_dir: false,
                        name: entry.name,
                        path: entry.path,
                    }
                }
            })
            .collect();

        let roots = RootKey::ALL
            .iter()
            .map(|key| RootLink {
                key: *key,
                label: key.label(),
                href: build_href(*key, ""),
                active: *key == location.root,
            })
            .collect();

        Self {
            root: location.root,
            owner: github.owner.clone(),
            repo: github.repo.clone(),
            root_path: location.root_path.clone(),
            roots,
            crumbs: crumbs(location.root, &location.sub_path),
            count: entries.len(),
            entries,
            error,
        }
    }
}

/// `error` field of a non-list body, if there is one
fn listing_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| "Failed to load listing".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::EntryType;
    use axum::http::StatusCode;

    fn entry(name: &str, entry_type: EntryType) -> RepoEntry {
        RepoEntry {
            name: name.to_string(),
            path: format!("web/content/download/{}", name),
            entry_type,
            size: Some(10),
        }
    }

    fn location(root: Option<&str>, path: Option<&str>) -> Location {
        let query = BrowseQuery {
            root: root.map(str::to_string),
            path: path.map(str::to_string),
        };
        Location::resolve(&query, &RootsConfig::default())
    }

    #[test]
    fn test_sort_dirs_first_alphabetical_without_gitkeep() {
        let entries = vec![
            entry("z.txt", EntryType::File),
            entry("b", EntryType::Dir),
            entry(".gitkeep", EntryType::File),
            entry("a.txt", EntryType::File),
            entry("A", EntryType::Dir),
        ];

        let names: Vec<String> = sort_entries(entries).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "b", "a.txt", "z.txt"]);
    }

    #[test]
    fn test_sort_drops_other_entry_types() {
        let entries = vec![entry("link", EntryType::Other), entry("f", EntryType::File)];
        let names: Vec<String> = sort_entries(entries).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["f"]);
    }

    #[test]
    fn test_root_key_defaults_to_download() {
        assert_eq!(RootKey::from_query(None), RootKey::Download);
        assert_eq!(RootKey::from_query(Some("blog")), RootKey::Blog);
        assert_eq!(RootKey::from_query(Some("etc")), RootKey::Download);
    }

    #[test]
    fn test_location_resolve() {
        let loc = location(Some("blog"), Some("/2026/feb"));
        assert_eq!(loc.root, RootKey::Blog);
        assert_eq!(loc.sub_path, "2026/feb");
        assert_eq!(loc.repo_path, "web/content/posts/2026/feb");

        let loc = location(None, None);
        assert_eq!(loc.repo_path, "web/content/download");
        assert_eq!(loc.relative_to_root("web/content/download/iso/x"), "iso/x");
        assert_eq!(loc.relative_to_root("other/place"), "other/place");
    }

    #[test]
    fn test_crumbs() {
        let crumbs = crumbs(RootKey::Download, "iso/linux");
        let paths: Vec<&str> = crumbs.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["", "iso", "iso/linux"]);
        assert_eq!(crumbs[0].label, "Library");
        assert_eq!(crumbs[2].label, "linux");
        assert_eq!(crumbs[2].href, "/download?root=download&path=iso%2Flinux");
    }

    #[test]
    fn test_build_view_links() {
        let loc = location(None, Some("iso"));
        let body = r#"[
            {"name": "old", "path": "web/content/download/iso/old", "type": "dir"},
            {"name": "tool v2.zip", "path": "web/content/download/iso/tool v2.zip", "type": "file", "size": 1536}
        ]"#;
        let listing = Listing {
            status: StatusCode::OK,
            body: body.to_string(),
        };

        let view = BrowserView::build(&loc, Ok(listing), &GithubConfig::default());
        assert!(view.error.is_none());
        assert_eq!(view.count, 2);

        let dir = &view.entries[0];
        assert!(dir.is_dir);
        assert_eq!(dir.href, "/download?root=download&path=iso%2Fold");

        let file = &view.entries[1];
        assert_eq!(file.href, "/api/dl?path=web%2Fcontent%2Fdownload%2Fiso%2Ftool%20v2.zip");
        assert_eq!(
            file.preview_href.as_deref(),
            Some("https://raw.githubusercontent.com/lztyblog/System-and-Device/main/web/content/download/iso/tool%20v2.zip")
        );
        assert_eq!(file.size, "1.5 KB");
        assert!(view.roots[0].active);
        assert!(!view.roots[1].active);
    }

    #[test]
    fn test_build_view_errors() {
        let loc = location(None, None);
        let err = ApiError::Upstream {
            status: StatusCode::NOT_FOUND,
            message: "GitHub API error 404".to_string(),
            detail: None,
        };
        let view = BrowserView::build(&loc, Err(err), &GithubConfig::default());
        assert_eq!(view.error.as_deref(), Some("GitHub API error 404"));
        assert!(view.entries.is_empty());

        let listing = Listing {
            status: StatusCode::OK,
            body: r#"{"name": "a.txt", "type": "file"}"#.to_string(),
        };
        let view = BrowserView::build(&loc, Ok(listing), &GithubConfig::default());
        assert_eq!(view.error.as_deref(), Some("Failed to load listing"));
    }
}
