//! In-memory note catalog

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Note category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "OS")]
    Os,
    Network,
    Hardware,
    Tools,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Os => "OS",
            Category::Network => "Network",
            Category::Hardware => "Hardware",
            Category::Tools => "Tools",
        };
        f.write_str(name)
    }
}

/// A short note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub slug: String,
    pub title: String,
    pub desc: String,
    pub category: Category,
    pub tags: Vec<String>,
    /// ISO 8601 timestamp
    pub updated_at: String,
    /// Markdown body
    pub content: String,
}

/// Category and tag index for the sidebar
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NotesMeta {
    /// Unique categories in catalog order
    pub categories: Vec<Category>,
    /// Unique tags, sorted
    pub tags: Vec<String>,
}

/// Read-only collection of notes
#[derive(Debug, Clone)]
pub struct NoteCatalog {
    notes: Vec<Note>,
}

impl NoteCatalog {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// The notes shipped with the site
    pub fn builtin() -> Self {
        Self::new(builtin_notes())
    }

    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes whose title, description or tags contain `query`, ignoring case.
    /// A blank query returns every note.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.notes.iter().collect();
        }

        self.notes
            .iter()
            .filter(|n| {
                let haystack =
                    format!("{} {} {}", n.title, n.desc, n.tags.join(" ")).to_lowercase();
                haystack.contains(&query)
            })
            .collect()
    }

    /// Notes carrying exactly `tag`
    pub fn by_tag(&self, tag: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| n.tags.iter().any(|t| t == tag))
            .collect()
    }

    pub fn get(&self, slug: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.slug == slug)
    }

    pub fn meta(&self) -> NotesMeta {
        let categories: IndexSet<Category> = self.notes.iter().map(|n| n.category).collect();
        let tags: IndexSet<&str> = self
            .notes
            .iter()
            .flat_map(|n| n.tags.iter().map(String::as_str))
            .collect();

        let mut tags: Vec<String> = tags.into_iter().map(str::to_string).collect();
        tags.sort();

        NotesMeta {
            categories: categories.into_iter().collect(),
            tags,
        }
    }
}

impl Default for NoteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn note(
    slug: &str,
    title: &str,
    desc: &str,
    category: Category,
    tags: &[&str],
    updated_at: &str,
    content: &str,
) -> Note {
    Note {
        slug: slug.to_string(),
        title: title.to_string(),
        desc: desc.to_string(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        updated_at: updated_at.to_string(),
        content: content.trim_start().to_string(),
    }
}

fn builtin_notes() -> Vec<Note> {
    vec![
        note(
            "wsl-basic",
            "WSL commands and pitfalls",
            "Installation, paths, permissions, port forwarding and common errors.",
            Category::Tools,
            &["wsl", "windows", "terminal"],
            "2026-02-10T09:00:00.000Z",
            r#"
# WSL commands and pitfalls

- `wsl --status` shows the current state
- Ports: the dev server listens on 3000 by default
- Paths: `/mnt/c` is the C: drive

## Common problems
- `Wsl/Service/E_UNEXPECTED`: restart the service or reinstall WSL
"#,
        ),
        note(
            "api-routes",
            "Writing HTTP API routes",
            "GET/POST handlers, caching headers and deployment notes.",
            Category::Tools,
            &["api", "http", "deploy"],
            "2026-02-10T10:00:00.000Z",
            r#"
# Writing HTTP API routes

Each route maps a method and path to a handler:

```rust
async fn hello() -> Json<Value> {
    Json(json!({ "ok": true }))
}
```

Send `Cache-Control: no-store` on responses that must always be fresh.
"#,
        ),
        note(
            "tcp-udp",
            "TCP vs UDP cheat sheet",
            "Connections, reliability, latency and typical use cases.",
            Category::Network,
            &["tcp", "udp", "network"],
            "2026-02-09T20:00:00.000Z",
            r#"
# TCP vs UDP

- TCP: reliable, ordered, connection-oriented
- UDP: fast, connectionless, may drop packets
"#,
        ),
        note(
            "linux-port-in-use",
            "Finding who holds a port on Linux",
            "lsof, ss and netstat; stopping services cleanly; port forwarding while debugging.",
            Category::Os,
            &["linux", "port", "debug"],
            "2026-02-09T12:00:00.000Z",
            r#"
# Finding who holds a port

```sh
ss -ltnp | grep :3000
lsof -i :3000
```

Stop the owning service with `systemctl stop <unit>` instead of `kill -9`.
"#,
        ),
        note(
            "local-http-vs-https",
            "Local http vs deployed https",
            "Why a local https URL fails with ERR_SSL_WRONG_VERSION_NUMBER and how to pick the scheme from forwarded headers.",
            Category::Network,
            &["https", "deploy", "http"],
            "2026-02-10T12:00:00.000Z",
            r#"
# Local http vs deployed https

The dev server only speaks plain http. Behind a proxy, read
`X-Forwarded-Proto` to learn which scheme the client used.
"#,
        ),
    ]
}
