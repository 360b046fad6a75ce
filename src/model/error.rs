//! Error types for cardflow.
//!
//! A small hierarchy built with `thiserror`. Concern-specific enums convert
//! into [`AppError`] through `From`, so the shell can propagate with `?`.
//!
//! # Recovery Strategy
//!
//! - [`ParseError`] is non-fatal: the offending markdown file is logged and
//!   skipped, the rest of the gallery still loads.
//! - [`ContentError`] is fatal: without a content directory there is nothing
//!   to show.
//! - [`MetaError`] while fetching a single repository is logged and skipped;
//!   failing to write the cache file is fatal for the `fetch-meta` command.
//! - Terminal I/O errors are fatal and end the event loop after the terminal
//!   has been restored.
//!
//! The masonry layout engine has no error type. Missing heights degrade to an
//! estimate and the worst outcome is an imbalanced set of columns.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Content directory could not be read.
    #[error("Failed to load content: {0}")]
    Content(#[from] ContentError),

    /// Repository metadata could not be loaded, fetched, or written.
    #[error("Repository metadata error: {0}")]
    Meta(#[from] MetaError),

    /// Terminal or rendering I/O failure.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors reading the content directory.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content directory does not exist.
    #[error("Content directory not found: {path}")]
    DirectoryNotFound {
        /// Missing directory.
        path: PathBuf,
    },

    /// Listing or reading failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors parsing a single markdown post.
///
/// Always non-fatal for the gallery: the file is skipped with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// File does not begin with a `---` or `+++` fence.
    #[error("{path}: missing front matter")]
    MissingFrontMatter {
        /// Offending file.
        path: PathBuf,
    },

    /// Opening fence without a closing fence.
    #[error("{path}: unterminated front matter")]
    UnterminatedFrontMatter {
        /// Offending file.
        path: PathBuf,
    },

    /// Front matter could not be interpreted.
    #[error("{path}: invalid front matter: {reason}")]
    InvalidFrontMatter {
        /// Offending file.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A required field is absent.
    #[error("{path}: missing required field `{field}`")]
    MissingField {
        /// Offending file.
        path: PathBuf,
        /// Name of the missing field.
        field: &'static str,
    },

    /// File stem is not a usable slug.
    #[error("{path}: invalid slug")]
    InvalidSlug {
        /// Offending file.
        path: PathBuf,
    },
}

/// Errors around the repository metadata cache and its fetcher.
#[derive(Debug, Error)]
pub enum MetaError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status.
    #[error("GitHub API error {status} for {repo}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Repository that was requested.
        repo: String,
    },

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The cache file exists but is not valid JSON of the expected shape.
    #[error("Invalid metadata cache at {path}: {reason}")]
    InvalidCache {
        /// Cache file path.
        path: PathBuf,
        /// Why the cache was rejected.
        reason: String,
    },

    /// Reading the cache file failed.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Cache file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the cache file failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Cache file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
