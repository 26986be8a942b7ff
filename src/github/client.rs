//! HTTP client for the GitHub Contents API and the raw-content CDN

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use std::time::Duration;

use super::DownloadRequest;
use crate::config::GithubConfig;
use crate::error::ApiError;
use crate::helpers;

/// A successful Contents API response, kept as the raw upstream text
#[derive(Debug, Clone)]
pub struct Listing {
    pub status: reqwest::StatusCode,
    pub body: String,
}

/// Thin wrapper around a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    fn api_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = &self.config.token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("Ignoring GitHub token with invalid characters"),
            }
        }
        headers
    }

    /// List a repo-relative directory at the configured branch.
    ///
    /// The path is not validated; leading slashes are dropped and an empty
    /// path lists the repository root. Each segment is percent-encoded so
    /// the configured `ref` cannot be overridden from the path. Non-2xx answers become
    /// [`ApiError::Upstream`] carrying the upstream status and raw body.
    pub async fn list_contents(&self, path: &str) -> Result<Listing, ApiError> {
        let path = path.trim_start_matches('/');
        let url = self.config.contents_url(&helpers::encode_path(path));
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .headers(self.api_headers())
            .send()
            .await
            .map_err(|source| {
                tracing::warn!("GitHub API request failed: {}", source);
                ApiError::Unreachable {
                    message: "GitHub API unreachable".to_string(),
                    source,
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Unreachable {
            message: "GitHub API unreachable".to_string(),
            source,
        })?;

        if !status.is_success() {
            tracing::warn!("GitHub API returned {} for {:?}", status, path);
            return Err(ApiError::Upstream {
                status,
                message: format!("GitHub API error {}", status.as_u16()),
                detail: Some(body),
            });
        }

        Ok(Listing { status, body })
    }

    /// Start fetching a validated file from the raw CDN.
    ///
    /// Only a [`DownloadRequest`] can reach this call, so disallowed paths are
    /// never requested upstream. The body is left unread for streaming.
    pub async fn fetch_raw(&self, request: &DownloadRequest) -> Result<reqwest::Response, ApiError> {
        let url = self.config.raw_file_url(&helpers::encode_path(request.path()));
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(|source| {
            tracing::warn!("Raw CDN request failed: {}", source);
            ApiError::Unreachable {
                message: "Upstream unreachable".to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Raw CDN returned {} for {:?}", status, request.path());
            return Err(ApiError::Upstream {
                status,
                message: format!("Upstream error {}", status.as_u16()),
                detail: None,
            });
        }

        Ok(response)
    }
}
