//! Error types for blogstatslib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a site.
///
/// Computing statistics never fails; only reading documents from disk does.
#[derive(Error, Debug)]
pub enum BlogstatsError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Front matter block is not valid YAML
    #[error("invalid front matter in '{path}': {message}")]
    FrontMatter { path: PathBuf, message: String },

    /// Document date could not be determined
    #[error("invalid date '{value}' in '{path}'")]
    InvalidDate { path: PathBuf, value: String },
}
