//! # Document Error Types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    /// The renderer could not produce output.
    #[error("Render failed: {0}")]
    Render(String),

    /// Writing the rendered file failed. No partial file is left behind.
    ///
    /// ## When This Occurs
    /// - Export directory can't be created
    /// - Disk full or read-only
    /// - Permissions
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document's file name is empty after sanitizing.
    #[error("Invalid file name: '{0}'")]
    InvalidFileName(String),
}

pub type DocResult<T> = Result<T, DocError>;
