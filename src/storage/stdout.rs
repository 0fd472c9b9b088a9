//! Standard-output sink.

use tokio::io::AsyncWriteExt;

use crate::error::{NoScriptError, Result};
use crate::storage::Storage;

/// Sink that prints each document to standard output followed by a newline.
///
/// The key is ignored; documents appear in the order they are put.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutStorage;

impl StdoutStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for StdoutStorage {
    async fn put(&self, _key: &str, content: &[u8]) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(content)
            .await
            .map_err(|e| NoScriptError::Output(Box::new(e)))?;
        stdout
            .write_all(b"\n")
            .await
            .map_err(|e| NoScriptError::Output(Box::new(e)))?;
        stdout
            .flush()
            .await
            .map_err(|e| NoScriptError::Output(Box::new(e)))
    }
}
