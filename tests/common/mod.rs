#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

use sysdev_site::config::SiteConfig;
use sysdev_site::content::{MarkdownRenderer, NoteCatalog, PostStore};
use sysdev_site::github::GithubClient;
use sysdev_site::server::{create_router, AppState};
use sysdev_site::templates::TemplateRenderer;

pub const OWNER: &str = "acme";
pub const REPO: &str = "library";

/// Router whose API and raw CDN both point at `upstream`
pub fn router(upstream: &str, posts_dir: &Path) -> Router {
    let mut config = SiteConfig::default();
    config.github.owner = OWNER.to_string();
    config.github.repo = REPO.to_string();
    config.github.api_url = upstream.to_string();
    config.github.raw_url = upstream.to_string();
    config.github.token = None;
    config.github.timeout_secs = 5;

    let state = AppState {
        github: GithubClient::new(config.github.clone()).unwrap(),
        notes: NoteCatalog::builtin(),
        posts: Arc::new(PostStore::new(posts_dir)),
        markdown: MarkdownRenderer::new(),
        templates: TemplateRenderer::new().unwrap(),
        config,
    };

    create_router(Arc::new(state))
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

pub fn assert_status(response: &Response, status: StatusCode) {
    assert_eq!(response.status(), status, "{:?}", response.headers());
}
