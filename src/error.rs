//! Error types for the `noscript_html` crate.
//!
//! The sanitization core itself never fails; these errors come from the
//! collaborators around it (reading input, writing output).

use std::path::PathBuf;

/// All errors that can occur around a sanitization run.
#[derive(Debug, thiserror::Error)]
pub enum NoScriptError {
    /// The input file could not be opened or read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sanitized document could not be written to its destination.
    #[error("Output failed: {0}")]
    Output(Box<dyn std::error::Error + Send + Sync>),
}

/// A type alias for `Result<T, NoScriptError>`.
pub type Result<T> = std::result::Result<T, NoScriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = NoScriptError::Io {
            path: PathBuf::from("missing.html"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.html"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn output_error_keeps_the_cause() {
        let err = NoScriptError::Output("disk full".into());
        assert_eq!(err.to_string(), "Output failed: disk full");
    }
}
