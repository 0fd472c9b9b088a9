//! Filesystem sink.

use std::path::{Component, Path, PathBuf};

use crate::error::{NoScriptError, Result};
use crate::storage::Storage;

/// Sink that writes sanitized documents into an output directory.
///
/// `key` must be a relative path below the directory; keys with `..`, a root
/// or a drive prefix are rejected so an input name can never place output
/// elsewhere. Intermediate directories are created. Each document is first
/// written to `<target>.partial` and then renamed over the target, so a failed
/// write never leaves a truncated page behind.
///
/// # Example
///
/// ```rust,no_run
/// use noscript_html::FsStorage;
///
/// let storage = FsStorage::new("/var/www/clean");
/// ```
pub struct FsStorage {
    out_dir: PathBuf,
}

impl FsStorage {
    /// Create a sink writing below `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Where `key` would be written, or `None` if it escapes the directory.
    fn target(&self, key: &str) -> Option<PathBuf> {
        let key = Path::new(key);
        let mut components = key.components().peekable();
        components.peek()?;
        if components.all(|c| matches!(c, Component::Normal(_))) {
            Some(self.out_dir.join(key))
        } else {
            None
        }
    }
}

impl Storage for FsStorage {
    async fn put(&self, key: &str, content: &[u8]) -> Result<()> {
        let path = self.target(key).ok_or_else(|| {
            NoScriptError::Output(
                format!("key {key:?} is not a path inside {}", self.out_dir.display()).into(),
            )
        })?;
        let output = |e: std::io::Error| NoScriptError::Output(Box::new(e));

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(output)?;
        }

        let mut staging = path.clone().into_os_string();
        staging.push(".partial");
        let staging = PathBuf::from(staging);

        tokio::fs::write(&staging, content).await.map_err(output)?;
        if let Err(e) = tokio::fs::rename(&staging, &path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(output(e));
        }

        tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_into_base_dir() {
        let tmp = TempDir::new().unwrap();
        let storage = FsStorage::new(tmp.path());
        storage.put("page.html", b"<p>x</p>").await.unwrap();
        let read = tokio::fs::read_to_string(tmp.path().join("page.html"))
            .await
            .unwrap();
        assert_eq!(read, "<p>x</p>");
    }

    #[tokio::test]
    async fn creates_missing_directories() {
        let tmp = TempDir::new().unwrap();
        let storage = FsStorage::new(tmp.path().join("a/b"));
        storage.put("c/page.html", b"x").await.unwrap();
        assert!(tmp.path().join("a/b/c/page.html").exists());
    }

    #[tokio::test]
    async fn unwritable_target_is_an_output_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("file");
        tokio::fs::write(&blocker, b"").await.unwrap();
        // A regular file cannot act as a directory.
        let storage = FsStorage::new(&blocker);
        let err = storage.put("page.html", b"x").await.unwrap_err();
        assert!(matches!(err, NoScriptError::Output(_)));
    }

    #[tokio::test]
    async fn keys_outside_the_directory_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let storage = FsStorage::new(tmp.path().join("out"));
        for key in ["../escape.html", "a/../../escape.html", "/etc/escape.html", ""] {
            let err = storage.put(key, b"x").await.unwrap_err();
            assert!(matches!(err, NoScriptError::Output(_)), "{key}");
        }
        assert!(!tmp.path().join("escape.html").exists());
    }

    #[tokio::test]
    async fn rewrite_replaces_the_whole_file() {
        let tmp = TempDir::new().unwrap();
        let storage = FsStorage::new(tmp.path());
        storage.put("page.html", b"<p>a much longer first version</p>").await.unwrap();
        storage.put("page.html", b"<p>b</p>").await.unwrap();

        let read = tokio::fs::read_to_string(tmp.path().join("page.html")).await.unwrap();
        assert_eq!(read, "<p>b</p>");
        assert!(!tmp.path().join("page.html.partial").exists());
    }
}
