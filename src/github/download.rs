//! Download path validation
//!
//! A requested path must pass these checks before the raw CDN is contacted.

use crate::config::RootsConfig;
use crate::error::PathError;
use crate::helpers;

/// A download path that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    path: String,
}

impl DownloadRequest {
    /// Validate a raw `path` query value against the allowed content roots.
    ///
    /// The path is trimmed, must be non-empty, must not contain `..`, and must
    /// equal an allowed prefix or sit below one (`<prefix>/...`).
    pub fn validate(raw: &str, roots: &RootsConfig) -> Result<Self, PathError> {
        let path = raw.trim();

        if path.is_empty() {
            return Err(PathError::Missing);
        }
        if path.contains("..") {
            return Err(PathError::Traversal);
        }

        let allowed = roots.allow_prefixes().iter().any(|prefix| {
            !prefix.is_empty()
                && (path == *prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/')))
        });
        if !allowed {
            return Err(PathError::NotAllowed);
        }

        Ok(Self {
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name offered to the browser in `Content-Disposition`
    pub fn filename(&self) -> &str {
        helpers::last_segment(&self.path).unwrap_or("download")
    }

    /// `attachment; filename="<encoded name>"`
    pub fn content_disposition(&self) -> String {
        format!(
            "attachment; filename=\"{}\"",
            helpers::encode_component(self.filename())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots() -> RootsConfig {
        RootsConfig::default()
    }

    #[test]
    fn test_missing_path() {
        assert_eq!(DownloadRequest::validate("", &roots()), Err(PathError::Missing));
        assert_eq!(DownloadRequest::validate("   ", &roots()), Err(PathError::Missing));
    }

    #[test]
    fn test_traversal_rejected_before_prefix_check() {
        for path in [
            "..",
            "web/content/download/../../secrets.env",
            "web/content/posts/..",
            "../web/content/download/a.txt",
            "elsewhere/../x",
        ] {
            assert_eq!(
                DownloadRequest::validate(path, &roots()),
                Err(PathError::Traversal),
                "{path}"
            );
        }
    }

    #[test]
    fn test_disallowed_prefix() {
        for path in [
            "README.md",
            "web/content",
            "web/content/downloads/a.txt",
            "web/content/download-extra/a.txt",
            "/web/content/download/a.txt",
            "src/main.rs",
        ] {
            assert_eq!(
                DownloadRequest::validate(path, &roots()),
                Err(PathError::NotAllowed),
                "{path}"
            );
        }
    }

    #[test]
    fn test_allowed_paths() {
        let req = DownloadRequest::validate(" web/content/download/iso/tool v2.zip ", &roots()).unwrap();
        assert_eq!(req.path(), "web/content/download/iso/tool v2.zip");
        assert_eq!(req.filename(), "tool v2.zip");
        assert_eq!(req.content_disposition(), "attachment; filename=\"tool%20v2.zip\"");

        let req = DownloadRequest::validate("web/content/posts/hello.md", &roots()).unwrap();
        assert_eq!(req.filename(), "hello.md");

        assert!(DownloadRequest::validate("web/content/posts", &roots()).is_ok());
    }

    #[test]
    fn test_trailing_slash_falls_back_to_download_name() {
        let req = DownloadRequest::validate("web/content/download/dir/", &roots()).unwrap();
        assert_eq!(req.filename(), "download");
    }
}
