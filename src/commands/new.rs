//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::PostStore;
use crate::Site;

/// Scaffold `<slug>.md` in the posts directory and return its path
pub fn create_post(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let store = PostStore::new(&site.posts_dir);
    if store.all_slugs()?.contains(&slug) {
        anyhow::bail!("A post named {:?} already exists in {:?}", slug, store.posts_dir());
    }

    fs::create_dir_all(store.posts_dir())?;
    let file_path = store.posts_dir().join(format!("{}.md", slug));

    let content = format!(
        "---\ntitle: {}\ndate: {}\ndescription: ''\ntags: []\n---\n",
        serde_json::to_string(title)?,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(file_path)
}
