//! Post store - loads markdown posts from the posts directory

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Post, PostMeta};

/// Summary length used when a post has no `summary` front-matter
const SUMMARY_CHARS: usize = 160;

/// Markdown posts stored as `<slug>.md` / `<slug>.mdx` files in one directory
pub struct PostStore {
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl PostStore {
    /// Create a store over `posts_dir`; the directory may not exist yet
    pub fn new<P: Into<PathBuf>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// All posts, newest first. Undated posts sort last.
    pub fn list(&self) -> Result<Vec<PostMeta>> {
        let mut posts: Vec<(i64, PostMeta)> = Vec::new();

        for path in self.post_files()? {
            match load_meta(&path) {
                Ok((fm, meta)) => posts.push((fm.timestamp(), meta)),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        posts.sort_by(|(ta, a), (tb, b)| tb.cmp(ta).then_with(|| a.slug.cmp(&b.slug)));

        Ok(posts.into_iter().map(|(_, meta)| meta).collect())
    }

    /// Posts whose title, description or tags contain `query`
    pub fn search(&self, query: &str) -> Result<Vec<PostMeta>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|meta| meta.matches(query))
            .collect())
    }

    /// Slugs of every post file, in no particular order
    pub fn all_slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .post_files()?
            .iter()
            .filter_map(|path| slug_of(path))
            .collect())
    }

    /// Look up a post by slug, preferring `.md` over `.mdx`
    pub fn get(&self, slug: &str) -> Result<Option<Post>> {
        if !is_safe_slug(slug) {
            return Ok(None);
        }

        let candidates = [
            self.posts_dir.join(format!("{}.md", slug)),
            self.posts_dir.join(format!("{}.mdx", slug)),
        ];
        let Some(path) = candidates.iter().find(|p| p.is_file()) else {
            return Ok(None);
        };

        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw)?;
        let html = self.renderer.render(body)?;
        let meta = build_meta(slug, fm, body);

        Ok(Some(Post {
            meta,
            content: body.to_string(),
            html,
        }))
    }

    /// Markdown files directly inside the posts directory
    fn post_files(&self) -> Result<Vec<PathBuf>> {
        if !self.posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }
}

fn load_meta(path: &Path) -> Result<(FrontMatter, PostMeta)> {
    let raw = fs::read_to_string(path)?;
    let (fm, body) = FrontMatter::parse(&raw)?;
    let slug = slug_of(path).unwrap_or_default();
    let meta = build_meta(&slug, fm.clone(), body);
    Ok((fm, meta))
}

fn build_meta(slug: &str, fm: FrontMatter, body: &str) -> PostMeta {
    let summary = fm
        .summary
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            let excerpt = MarkdownRenderer::plain_excerpt(body, SUMMARY_CHARS);
            (!excerpt.is_empty()).then_some(excerpt)
        });

    PostMeta {
        slug: slug.to_string(),
        title: fm
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| slug.to_string()),
        date: fm.date.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
        description: fm.description,
        tags: fm.tags,
        summary,
    }
}

/// Check if a file is a markdown post
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx")
        .unwrap_or(false)
}

fn slug_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Slugs never address anything outside the posts directory
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\']) && !slug.contains("..")
}
