//! Errors raised by document file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading or writing the document on disk.
///
/// Every variant carries the path involved so the message shown in the
/// error alert names the file the user picked.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no file is associated with this document")]
    NoPath,
}

impl DocumentError {
    /// Path the failure refers to, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            DocumentError::Read { path, .. }
            | DocumentError::Decode { path, .. }
            | DocumentError::Write { path, .. } => Some(path),
            DocumentError::NoPath => None,
        }
    }
}
