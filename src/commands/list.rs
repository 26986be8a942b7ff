//! List site content

use anyhow::Result;
use indexmap::IndexMap;

use crate::content::{NoteCatalog, PostStore};
use crate::helpers;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let store = PostStore::new(&site.posts_dir);
    let notes = NoteCatalog::builtin();

    match content_type {
        "post" | "posts" => {
            let posts = store.list()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date
                        .as_deref()
                        .map(helpers::short_date)
                        .unwrap_or_default(),
                    post.title,
                    post.slug
                );
            }
        }
        "note" | "notes" => {
            println!("Notes ({}):", notes.len());
            for note in notes.all() {
                println!(
                    "  {} - {} [{}] ({})",
                    note.slug,
                    note.title,
                    note.category,
                    note.tags.join(", ")
                );
            }
        }
        "tag" | "tags" => {
            let mut tags: IndexMap<String, usize> = IndexMap::new();
            for post in store.list()? {
                for tag in post.tags {
                    *tags.entry(tag).or_insert(0) += 1;
                }
            }
            for note in notes.all() {
                for tag in &note.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            tags.sort_by(|_, a, _, b| b.cmp(a));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let mut categories: IndexMap<String, usize> = IndexMap::new();
            for note in notes.all() {
                *categories.entry(note.category.to_string()).or_insert(0) += 1;
            }
            println!("Categories ({}):", categories.len());
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, note, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
