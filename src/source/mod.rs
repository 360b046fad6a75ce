//! Content source: the directory of markdown posts.
//!
//! Loading is read-once at startup. Files that fail to parse are logged and
//! skipped so one bad post never hides the rest of the gallery.

use crate::model::{ContentError, ParseError, Post};
use crate::parser::parse_post;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Posts loaded from a content directory, plus the files that were skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadedContent {
    /// Posts in file name order.
    pub posts: Vec<Post>,
    /// Parse failures, one per skipped file.
    pub skipped: Vec<ParseError>,
}

impl LoadedContent {
    /// Distinct tags across all posts, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        all_tags(&self.posts)
    }
}

/// Distinct tags across `posts`, sorted.
pub fn all_tags(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|p| p.meta().tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Load every `*.md` file directly inside `dir`.
///
/// Files are processed in file name order, which is also the initial display
/// order of the gallery.
///
/// # Errors
///
/// Returns `ContentError::DirectoryNotFound` if `dir` does not exist and
/// `ContentError::Io` if it cannot be listed. Per-file read and parse
/// failures are not errors; they are collected in `skipped` (read failures
/// are logged only).
pub fn load_posts(dir: &Path) -> Result<LoadedContent, ContentError> {
    if !dir.is_dir() {
        return Err(ContentError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|source| ContentError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();

    let mut content = LoadedContent::default();

    for path in files {
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read post, skipping");
                continue;
            }
        };

        match parse_post(&path, &raw) {
            Ok(post) => content.posts.push(post),
            Err(e) => {
                warn!(error = %e, "Failed to parse post, skipping");
                content.skipped.push(e);
            }
        }
    }

    info!(
        dir = %dir.display(),
        posts = content.posts.len(),
        skipped = content.skipped.len(),
        "Content loaded"
    );

    Ok(content)
}

/// Resolve the default content directory.
///
/// Prefers `src/content/posts` (the layout of the original site) when it
/// exists, otherwise `content/posts`.
pub fn default_content_dir() -> PathBuf {
    let site_layout = PathBuf::from("src").join("content").join("posts");
    if site_layout.is_dir() {
        site_layout
    } else {
        PathBuf::from("content").join("posts")
    }
}
