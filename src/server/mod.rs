//! HTTP server: JSON API routes and server-rendered pages

mod api;
mod pages;

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, NoteCatalog, PostStore};
use crate::github::GithubClient;
use crate::templates::TemplateRenderer;
use crate::Site;

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub config: SiteConfig,
    pub github: GithubClient,
    pub notes: NoteCatalog,
    pub posts: Arc<PostStore>,
    pub markdown: MarkdownRenderer,
    pub templates: TemplateRenderer,
}

impl AppState {
    /// Build the state for a loaded site
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            config: site.config.clone(),
            github: GithubClient::new(site.config.github.clone())?,
            notes: NoteCatalog::builtin(),
            posts: Arc::new(PostStore::new(site.posts_dir.clone())),
            markdown: MarkdownRenderer::new(),
            templates: TemplateRenderer::new()?,
        })
    }
}

/// All routes of the site
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/blog", get(pages::blog_index))
        .route("/blog/:slug", get(pages::blog_post))
        .route("/notes/:slug", get(pages::note_page))
        .route("/download", get(pages::download))
        .route("/api/gh", get(api::github_listing))
        .route("/api/dl", get(api::download))
        .route("/api/notes", get(api::notes_index))
        .route("/api/notes/:slug", get(api::note_detail))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and block until it stops
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(site)?);
    let app = create_router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!(
        "Browsing {}/{}@{}",
        site.config.github.owner, site.config.github.repo, site.config.github.branch
    );
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
