//! Post models

use serde::Serialize;

/// Metadata shown on list pages
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostMeta {
    /// File name without the `.md`/`.mdx` extension
    pub slug: String,

    /// Front-matter title, falling back to the slug
    pub title: String,

    /// Date exactly as written in the front-matter
    pub date: Option<String>,

    pub description: Option<String>,

    pub tags: Vec<String>,

    /// Teaser text: front-matter summary, else the start of the body
    pub summary: Option<String>,
}

impl PostMeta {
    /// Case-insensitive substring match across title, description and tags
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        let haystack = format!(
            "{} {} {}",
            self.title,
            self.description.as_deref().unwrap_or(""),
            self.tags.join(" ")
        )
        .to_lowercase();
        haystack.contains(&query)
    }
}

/// A full post ready for its detail page
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub meta: PostMeta,

    /// Raw markdown body, without front-matter
    pub content: String,

    /// Rendered HTML body
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> PostMeta {
        PostMeta {
            slug: "port-debugging".to_string(),
            title: "Port debugging on Linux".to_string(),
            date: Some("2026-02-09".to_string()),
            description: Some("lsof and ss".to_string()),
            tags: vec!["Linux".to_string(), "debug".to_string()],
            summary: None,
        }
    }

    #[test]
    fn test_matches_title_description_and_tags() {
        let meta = meta();
        assert!(meta.matches("PORT"));
        assert!(meta.matches("lsof"));
        assert!(meta.matches("linux"));
        assert!(meta.matches("  "));
        assert!(!meta.matches("wsl"));
    }
}
