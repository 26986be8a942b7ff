//! JSON API handlers: GitHub listing/download proxies and the notes API

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::AppState;
use crate::content::Note;
use crate::error::{ApiError, Result};
use crate::github::DownloadRequest;

const NOTES_HINT: &str = "Use /api/notes/:slug for a single note, or ?q= to search";

#[derive(Debug, Default, Deserialize)]
pub struct PathQuery {
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// `GET /api/gh?path=` - forward a Contents API listing
pub async fn github_listing(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Response> {
    let path = query.path.unwrap_or_default();
    let listing = state.github.list_contents(&path).await?;

    Ok((
        listing.status,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        listing.body,
    )
        .into_response())
}

/// `GET /api/dl?path=` - stream an allowed file from the raw CDN as an attachment
pub async fn download(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Response> {
    let raw = query.path.unwrap_or_default();
    let request = DownloadRequest::validate(&raw, &state.config.roots).map_err(|e| {
        tracing::debug!("Rejected download path {:?}: {}", raw, e);
        ApiError::from(e)
    })?;

    let upstream = state.github.fetch_raw(&request).await?;

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&request.content_disposition())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"download\""));

    tracing::info!("Streaming download {}", request.path());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    Ok(response)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesEnvelopeMeta {
    pub count: usize,
    pub generated_at: String,
    pub hint: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NotesEnvelope<'a> {
    pub meta: NotesEnvelopeMeta,
    pub items: Vec<&'a Note>,
}

/// `GET /api/notes[?q=]`
pub async fn notes_index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let items = state.notes.search(query.q.as_deref().unwrap_or(""));

    let envelope = NotesEnvelope {
        meta: NotesEnvelopeMeta {
            count: items.len(),
            generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            hint: NOTES_HINT,
        },
        items,
    };

    Json(envelope).into_response()
}

/// `GET /api/notes/:slug`
pub async fn note_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response> {
    match state.notes.get(&slug) {
        Some(note) => Ok((StatusCode::OK, Json(note)).into_response()),
        None => Err(ApiError::NotFound("Note not found".to_string())),
    }
}
