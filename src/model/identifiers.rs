//! Validated identifier newtypes.
//!
//! Smart constructors reject values that would break identity lookups.

use std::fmt;
use thiserror::Error;

/// Error returned when a slug is empty or contains a path separator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid slug: {0:?}")]
pub struct InvalidSlug(pub String);

/// Unique identity of a post, derived from its file stem.
///
/// Slugs are the keys of the height record and of the install selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    /// Create a slug. Rejects empty strings and strings containing `/` or `\`.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidSlug> {
        let raw = raw.into();
        if raw.trim().is_empty() || raw.contains('/') || raw.contains('\\') {
            return Err(InvalidSlug(raw));
        }
        Ok(Self(raw))
    }

    /// The slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `owner/repo` key of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoKey {
    owner: String,
    repo: String,
}

impl RepoKey {
    /// Extract the repository key from a GitHub URL.
    ///
    /// Returns `None` when the URL does not parse, the host is not a
    /// `github.com` host, or the path has fewer than two segments.
    /// Extra segments (`/tree/main/...`) are ignored.
    pub fn from_url(url: &str) -> Option<Self> {
        let parsed = reqwest::Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        if !host.contains("github.com") {
            return None;
        }

        let mut parts = parsed.path().split('/').filter(|s| !s.is_empty());
        let owner = parts.next()?;
        let repo = parts.next()?;

        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
