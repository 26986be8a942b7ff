//! Server-rendered HTML pages

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;

use super::AppState;
use crate::browser::{BrowseQuery, BrowserView, Location};
use crate::content::{Note, PostMeta};
use crate::helpers;
use crate::templates::TemplateRenderer;

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub q: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
struct TagLink {
    name: String,
    href: String,
}

fn render_page(
    state: &AppState,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> Response {
    match state.templates.render(template, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {}: {:?}", template, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

fn not_found_page(state: &AppState, message: &str, back_href: &str) -> Response {
    let mut context = TemplateRenderer::page_context(&state.config, "Not found");
    context.insert("message", message);
    context.insert("back_href", back_href);
    render_page(state, "not_found.html", &context, StatusCode::NOT_FOUND)
}

/// Posts matching `query`, newest first, or an empty list when the
/// directory cannot be read
async fn load_posts(state: &Arc<AppState>, query: String) -> Vec<PostMeta> {
    let posts = Arc::clone(&state.posts);
    match tokio::task::spawn_blocking(move || posts.search(&query)).await {
        Ok(Ok(list)) => list,
        Ok(Err(e)) => {
            tracing::warn!("Failed to list posts: {}", e);
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Post listing task failed: {}", e);
            Vec::new()
        }
    }
}

/// Notes matching the home page filters
async fn load_notes<'a>(state: &'a AppState, query: &HomeQuery) -> Vec<&'a Note> {
    let mut notes = state.notes.search(query.q.as_deref().unwrap_or(""));
    if let Some(tag) = query.tag.as_deref().filter(|t| !t.is_empty()) {
        let tagged = state.notes.by_tag(tag);
        notes.retain(|n| tagged.iter().any(|t| t.slug == n.slug));
    }
    notes
}

/// `GET /`
pub async fn home(State(state): State<Arc<AppState>>, Query(query): Query<HomeQuery>) -> Response {
    let (mut posts, notes) = tokio::join!(load_posts(&state, String::new()), load_notes(&state, &query));
    posts.truncate(state.config.home.post_count);

    let meta = state.notes.meta();
    let tag_links: Vec<TagLink> = meta
        .tags
        .iter()
        .map(|tag| TagLink {
            href: format!("/?tag={}", helpers::encode_component(tag)),
            name: tag.clone(),
        })
        .collect();

    let mut context = TemplateRenderer::page_context(&state.config, "");
    context.insert("posts", &posts);
    context.insert("notes", &notes);
    context.insert("meta", &meta);
    context.insert("tag_links", &tag_links);
    context.insert("query", query.q.as_deref().unwrap_or(""));
    context.insert("active_tag", query.tag.as_deref().unwrap_or(""));

    render_page(&state, "home.html", &context, StatusCode::OK)
}

/// `GET /blog`
pub async fn blog_index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BlogQuery>,
) -> Response {
    let q = query.q.unwrap_or_default();
    let posts = load_posts(&state, q.clone()).await;

    let mut context = TemplateRenderer::page_context(&state.config, "Blog");
    context.insert("posts", &posts);
    context.insert("query", &q);
    render_page(&state, "blog.html", &context, StatusCode::OK)
}

/// `GET /blog/:slug`
pub async fn blog_post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let posts = Arc::clone(&state.posts);
    let lookup = slug.clone();
    let post = match tokio::task::spawn_blocking(move || posts.get(&lookup)).await {
        Ok(Ok(post)) => post,
        Ok(Err(e)) => {
            tracing::warn!("Failed to load post {:?}: {}", slug, e);
            None
        }
        Err(e) => {
            tracing::warn!("Post loading task failed: {}", e);
            None
        }
    };

    match post {
        Some(post) => {
            let mut context = TemplateRenderer::page_context(&state.config, &post.meta.title);
            context.insert("post", &post);
            render_page(&state, "post.html", &context, StatusCode::OK)
        }
        None => not_found_page(&state, &format!("No post named \"{}\"", slug), "/blog"),
    }
}

/// `GET /notes/:slug`
pub async fn note_page(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let Some(note) = state.notes.get(&slug) else {
        return not_found_page(&state, &format!("No note named \"{}\"", slug), "/");
    };

    let html = match state.markdown.render(&note.content) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Failed to render note {:?}: {}", slug, e);
            String::new()
        }
    };

    let mut context = TemplateRenderer::page_context(&state.config, &note.title);
    context.insert("note", note);
    context.insert("html", &html);
    render_page(&state, "note.html", &context, StatusCode::OK)
}

/// `GET /download?root=&path=`
pub async fn download(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BrowseQuery>,
) -> Response {
    let location = Location::resolve(&query, &state.config.roots);
    let listing = state.github.list_contents(&location.repo_path).await;
    let view = BrowserView::build(&location, listing, state.github.config());

    let mut context = TemplateRenderer::page_context(&state.config, location.root.label());
    context.insert("view", &view);
    render_page(&state, "download.html", &context, StatusCode::OK)
}

/// Any unknown route
pub async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    not_found_page(&state, "Page not found", "/")
}
