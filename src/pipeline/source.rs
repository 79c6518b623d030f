//! Content-root resolution: normalise a user-supplied directory or URL into
//! a fetchable source.
//!
//! A content root is either a local directory (the common case for builds
//! and tests) or an HTTP(S) base URL (the deployed site's `data/` prefix).
//! Both expose the same relative-path fetch so the loader never cares which
//! one it is talking to.

use crate::error::{DocumentError, FolioError};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// A resolved content root.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Content lives in a local directory.
    Local(PathBuf),
    /// Content is fetched relative to an HTTP(S) base URL.
    Remote {
        base: String,
        client: reqwest::Client,
        timeout_secs: u64,
    },
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

impl ContentSource {
    /// Resolve the input string to a content source.
    ///
    /// A URL builds a client with the given per-request timeout; anything
    /// else must be an existing local directory.
    pub fn resolve(input: &str, timeout_secs: u64) -> Result<Self, FolioError> {
        if is_url(input) {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .map_err(|e| FolioError::Internal(format!("HTTP client: {e}")))?;
            return Ok(ContentSource::Remote {
                base: input.trim_end_matches('/').to_string(),
                client,
                timeout_secs,
            });
        }

        let path = PathBuf::from(input);
        if !path.is_dir() {
            return Err(FolioError::InvalidContentRoot {
                input: input.to_string(),
            });
        }
        debug!("Resolved local content root: {}", path.display());
        Ok(ContentSource::Local(path))
    }

    /// Fetch the text of a file at `rel` under this content root.
    pub async fn fetch_text(&self, rel: &str) -> Result<String, DocumentError> {
        match self {
            ContentSource::Local(dir) => {
                tokio::fs::read_to_string(dir.join(rel))
                    .await
                    .map_err(|e| DocumentError::FetchFailed {
                        filename: rel.to_string(),
                        detail: e.to_string(),
                    })
            }
            ContentSource::Remote {
                base,
                client,
                timeout_secs,
            } => {
                let url = format!("{base}/{rel}");
                let response = client.get(&url).send().await.map_err(|e| {
                    if e.is_timeout() {
                        DocumentError::Timeout {
                            filename: rel.to_string(),
                            secs: *timeout_secs,
                        }
                    } else {
                        DocumentError::FetchFailed {
                            filename: rel.to_string(),
                            detail: e.to_string(),
                        }
                    }
                })?;

                if !response.status().is_success() {
                    return Err(DocumentError::FetchFailed {
                        filename: rel.to_string(),
                        detail: format!("HTTP {}", response.status()),
                    });
                }

                response.text().await.map_err(|e| DocumentError::FetchFailed {
                    filename: rel.to_string(),
                    detail: e.to_string(),
                })
            }
        }
    }

    /// Human-readable location of `rel` under this root, for error messages.
    pub fn locate(&self, rel: &str) -> String {
        match self {
            ContentSource::Local(dir) => dir.join(rel).display().to_string(),
            ContentSource::Remote { base, .. } => format!("{base}/{rel}"),
        }
    }

    /// Map a manifest-level fetch failure to the fatal error taxonomy.
    pub(crate) fn manifest_error(&self, rel: &str, err: DocumentError) -> FolioError {
        match self {
            ContentSource::Local(dir) => FolioError::ManifestNotFound {
                path: dir.join(rel),
            },
            ContentSource::Remote { base, .. } => FolioError::ManifestFetchFailed {
                url: format!("{base}/{rel}"),
                reason: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/data"));
        assert!(is_url("http://localhost:8000/data"));
        assert!(!is_url("/srv/site/data"));
        assert!(!is_url("data"));
        assert!(!is_url(""));
    }

    #[test]
    fn missing_directory_is_rejected() {
        let err = ContentSource::resolve("/definitely/not/a/dir", 30);
        assert!(matches!(
            err,
            Err(FolioError::InvalidContentRoot { .. })
        ));
    }

    #[test]
    fn remote_base_trailing_slash_is_trimmed() {
        let src = ContentSource::resolve("https://example.com/data/", 30).unwrap();
        assert_eq!(src.locate("a.md"), "https://example.com/data/a.md");
    }

    #[tokio::test]
    async fn local_fetch_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hello.md"), "hi").unwrap();

        let src = ContentSource::resolve(dir.path().to_str().unwrap(), 30).unwrap();
        assert_eq!(src.fetch_text("hello.md").await.unwrap(), "hi");

        let err = src.fetch_text("missing.md").await.unwrap_err();
        assert_eq!(err.filename(), "missing.md");
    }
}
