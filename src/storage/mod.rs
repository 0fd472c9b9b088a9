//! Destinations for sanitized documents.
//!
//! The crate ships with two built-in sinks:
//!
//! - [`FsStorage`] -- writes each document into a directory.
//! - [`StdoutStorage`] -- writes each document to standard output.
//!
//! Implement the [`Storage`] trait to add your own destination.

mod fs;
mod stdout;

pub use fs::FsStorage;
pub use stdout::StdoutStorage;

use crate::error::Result;

use std::future::Future;

/// Trait for sinks that receive sanitized HTML.
///
/// Implementations must be `Send + Sync + 'static` so they can be used from
/// a batch run.
///
/// # Implementing a custom sink
///
/// ```rust,no_run
/// use noscript_html::{Storage, Result};
///
/// struct MySink;
///
/// impl Storage for MySink {
///     async fn put(&self, key: &str, content: &[u8]) -> Result<()> {
///         // write content somewhere ...
///         Ok(())
///     }
/// }
/// ```
pub trait Storage: Send + Sync + 'static {
    /// Persist `content` under `key`: the input's file name, with a counter
    /// added when several inputs share that name.
    fn put(&self, key: &str, content: &[u8]) -> impl Future<Output = Result<()>> + Send;
}
