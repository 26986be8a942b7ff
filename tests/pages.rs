mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{assert_status, body_string, get, router, OWNER, REPO};

fn write_post(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

fn position(html: &str, needle: &str) -> usize {
    html.find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in page", needle))
}

#[tokio::test]
async fn download_page_sorts_and_links_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{}/{}/contents/web/content/download/iso",
            OWNER, REPO
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "z.txt", "path": "web/content/download/iso/z.txt", "type": "file", "size": 2048 },
            { "name": "b", "path": "web/content/download/iso/b", "type": "dir" },
            { "name": ".gitkeep", "path": "web/content/download/iso/.gitkeep", "type": "file", "size": 0 },
            { "name": "a.txt", "path": "web/content/download/iso/a.txt", "type": "file", "size": 10 },
            { "name": "A", "path": "web/content/download/iso/A", "type": "dir" }
        ])))
        .mount(&server)
        .await;
    let posts = TempDir::new().unwrap();

    let response = get(
        router(&server.uri(), posts.path()),
        "/download?root=download&path=/iso",
    )
    .await;
    assert_status(&response, StatusCode::OK);
    let html = body_string(response).await;

    let dir_a = position(&html, "📁 A</a>");
    let dir_b = position(&html, "📁 b</a>");
    let file_a = position(&html, "⬇️ a.txt</a>");
    let file_z = position(&html, "⬇️ z.txt</a>");
    assert!(dir_a < dir_b && dir_b < file_a && file_a < file_z);
    assert!(!html.contains(".gitkeep"));

    assert!(html.contains("href=\"/download?root=download&path=iso%2FA\""));
    assert!(html.contains("href=\"/api/dl?path=web%2Fcontent%2Fdownload%2Fiso%2Fz.txt\""));
    assert!(html.contains("2.0 KB"));
    assert!(html.contains("4 items"));
}

#[tokio::test]
async fn download_page_lists_directory_with_reserved_characters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{}/{}/contents/web/content/download/c%23%20notes",
            OWNER, REPO
        )))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "ptr.md", "path": "web/content/download/c# notes/ptr.md", "type": "file", "size": 40 }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let posts = TempDir::new().unwrap();

    let response = get(
        router(&server.uri(), posts.path()),
        "/download?root=download&path=c%23%20notes",
    )
    .await;
    assert_status(&response, StatusCode::OK);
    let html = body_string(response).await;

    assert!(html.contains("⬇️ ptr.md</a>"));
    assert!(html.contains("1 items"));
}

#[tokio::test]
async fn download_page_shows_listing_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("rate limited"))
        .mount(&server)
        .await;
    let posts = TempDir::new().unwrap();

    let response = get(router(&server.uri(), posts.path()), "/download?root=blog").await;
    assert_status(&response, StatusCode::OK);
    let html = body_string(response).await;

    assert!(html.contains("GitHub API error 403"));
    assert!(html.contains("This directory is empty."));
}

#[tokio::test]
async fn blog_lists_posts_newest_first() {
    let posts = TempDir::new().unwrap();
    write_post(&posts, "old.md", "---\ntitle: Old post\ndate: 2023-01-01\n---\nold body\n");
    write_post(&posts, "new.md", "---\ntitle: New post\ndate: 2026-02-10\n---\nnew body\n");
    write_post(&posts, "undated.mdx", "---\ntitle: Undated\ndate: someday\n---\nbody\n");

    let response = get(router("http://127.0.0.1:1", posts.path()), "/blog").await;
    assert_status(&response, StatusCode::OK);
    let html = body_string(response).await;

    let new = position(&html, "New post");
    let old = position(&html, "Old post");
    let undated = position(&html, "Undated");
    assert!(new < old && old < undated);
}

#[tokio::test]
async fn blog_search_filters_posts() {
    let posts = TempDir::new().unwrap();
    write_post(&posts, "wsl.md", "---\ntitle: WSL ports\ntags: [windows]\n---\nbody\n");
    write_post(&posts, "tcp.md", "---\ntitle: TCP basics\ndescription: sockets\n---\nbody\n");

    let response = get(router("http://127.0.0.1:1", posts.path()), "/blog?q=WINDOWS").await;
    assert_status(&response, StatusCode::OK);
    let html = body_string(response).await;

    assert!(html.contains("WSL ports"));
    assert!(!html.contains("TCP basics"));
}

#[tokio::test]
async fn blog_post_renders_and_missing_is_404() {
    let posts = TempDir::new().unwrap();
    write_post(
        &posts,
        "hello.md",
        "---\ntitle: Hello\ndate: 2026-01-05\ntags: [intro]\n---\n# Heading\n\nSome *text*.\n",
    );

    let response = get(router("http://127.0.0.1:1", posts.path()), "/blog/hello").await;
    assert_status(&response, StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<em>text</em>"));
    assert!(html.contains("#intro"));

    let response = get(router("http://127.0.0.1:1", posts.path()), "/blog/missing").await;
    assert_status(&response, StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("href=\"/blog\""));
}

#[tokio::test]
async fn note_page_renders_and_missing_is_404() {
    let posts = TempDir::new().unwrap();

    let response = get(router("http://127.0.0.1:1", posts.path()), "/notes/tcp-udp").await;
    assert_status(&response, StatusCode::OK);
    assert!(body_string(response).await.contains("TCP vs UDP cheat sheet"));

    let response = get(router("http://127.0.0.1:1", posts.path()), "/notes/nope").await;
    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_filters_notes_by_tag_and_query() {
    let posts = TempDir::new().unwrap();
    write_post(&posts, "first.md", "---\ntitle: First post\ndate: 2026-01-01\n---\nbody\n");

    let response = get(router("http://127.0.0.1:1", posts.path()), "/").await;
    assert_status(&response, StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("First post"));
    assert!(html.contains("href=\"/notes/wsl-basic\""));
    assert!(html.contains("href=\"/notes/tcp-udp\""));

    let response = get(router("http://127.0.0.1:1", posts.path()), "/?tag=tcp").await;
    let html = body_string(response).await;
    assert!(html.contains("href=\"/notes/tcp-udp\""));
    assert!(!html.contains("href=\"/notes/wsl-basic\""));

    let response = get(router("http://127.0.0.1:1", posts.path()), "/?q=wsl").await;
    let html = body_string(response).await;
    assert!(html.contains("href=\"/notes/wsl-basic\""));
    assert!(!html.contains("href=\"/notes/tcp-udp\""));
}

#[tokio::test]
async fn unknown_route_is_404_page() {
    let posts = TempDir::new().unwrap();
    let response = get(router("http://127.0.0.1:1", posts.path()), "/nowhere").await;
    assert_status(&response, StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("Page not found"));
}
