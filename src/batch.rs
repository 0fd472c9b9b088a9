//! Sanitizing a set of input files and handing the results to a [`Storage`].
//!
//! Every file gets its own independent pass; files are read and sanitized
//! concurrently, then written to the sink in input order. Inputs that share a
//! file name get distinct keys (`page.html`, `page-2.html`, ...).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::dom::Document;
use crate::engine::Cleaner;
use crate::error::{NoScriptError, Result};
use crate::sanitizer::Report;
use crate::storage::Storage;

/// What happened to one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Key the result was stored under.
    pub key: String,
    pub report: Report,
}

/// Read, parse and sanitize a single HTML file.
///
/// The returned bytes are in the charset the input was read with (see
/// [`Charset`](crate::dom::Charset)).
pub async fn clean_file(cleaner: &Cleaner, path: &Path) -> Result<(Vec<u8>, Report)> {
    let bytes = tokio::fs::read(path).await.map_err(|source| NoScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (document, charset) = Document::from_bytes(bytes);

    let (document, report) = cleaner.clean(document).into_parts();
    tracing::debug!(
        "Sanitized {} ({charset:?}): {} findings",
        path.display(),
        report.findings().len()
    );
    Ok((charset.encode(document.to_html()), report))
}

/// Sanitize every path in `inputs` and put the results into `storage`.
///
/// Returns one result per input, in input order. A failing file does not
/// stop the others.
pub async fn run<S: Storage>(
    cleaner: &Cleaner,
    inputs: &[PathBuf],
    storage: &S,
) -> Vec<Result<FileOutcome>> {
    let count = inputs.len();
    tracing::debug!("Sanitizing batch of {count} files");

    let cleaned = futures::future::join_all(inputs.iter().map(|path| clean_file(cleaner, path))).await;

    let mut used = HashSet::with_capacity(count);
    let mut outcomes = Vec::with_capacity(count);
    for (path, result) in inputs.iter().zip(cleaned) {
        let outcome = match result {
            Ok((html, report)) => {
                let key = unique_key(key_for(path), &mut used);
                storage
                    .put(&key, &html)
                    .await
                    .map(|()| FileOutcome {
                        path: path.clone(),
                        key,
                        report,
                    })
            }
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            tracing::error!("Failed on {}: {e}", path.display());
        }
        outcomes.push(outcome);
    }

    tracing::debug!("Finished {count} files");
    outcomes
}

fn key_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.html".to_string())
}

/// Return `key`, or `stem-N.ext` with the smallest `N >= 2` not yet in `used`.
fn unique_key(key: String, used: &mut HashSet<String>) -> String {
    if used.insert(key.clone()) {
        return key;
    }
    let (stem, ext) = match key.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (key.as_str(), None),
    };
    let mut n = 2;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{stem}-{n}.{ext}"),
            None => format!("{stem}-{n}"),
        };
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
