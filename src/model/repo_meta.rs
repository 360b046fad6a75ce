//! Repository metadata cache produced by `cardflow fetch-meta`.
//!
//! The cache is a JSON object keyed by `owner/repo`. It is read once at
//! startup and never mutated by the gallery.

use crate::model::error::MetaError;
use crate::model::RepoKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Subset of the GitHub repository payload shown on github cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMeta {
    /// `owner/repo` as GitHub spells it.
    pub full_name: String,
    /// Repository description.
    pub description: Option<String>,
    /// Star count.
    pub stargazers_count: u64,
    /// Fork count.
    pub forks_count: u64,
    /// Open issue count.
    pub open_issues_count: u64,
    /// Primary language.
    pub language: Option<String>,
    /// Repository page.
    pub html_url: String,
}

/// Mapping from `owner/repo` to metadata. Ordered so the written file is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoMetaCache {
    entries: BTreeMap<String, RepoMeta>,
}

impl RepoMetaCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cache from a JSON file.
    ///
    /// A missing file yields an empty cache. A file that exists but does not
    /// parse is an error.
    pub fn load(path: &Path) -> Result<Self, MetaError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| MetaError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|e| MetaError::InvalidCache {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write the cache as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), MetaError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| MetaError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| MetaError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Store metadata for `key`.
    pub fn insert(&mut self, key: &RepoKey, meta: RepoMeta) {
        self.entries.insert(key.to_string(), meta);
    }

    /// Whether `key` has metadata.
    pub fn contains(&self, key: &RepoKey) -> bool {
        self.entries.contains_key(&key.to_string())
    }

    /// Metadata for `key`.
    pub fn get(&self, key: &RepoKey) -> Option<&RepoMeta> {
        self.entries.get(&key.to_string())
    }

    /// Look up metadata for a repository URL.
    pub fn lookup_url(&self, url: &str) -> Option<&RepoMeta> {
        RepoKey::from_url(url).and_then(|key| self.get(&key))
    }

    /// Number of repositories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no repository.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RepoMeta {
        RepoMeta {
            full_name: "ratatui/ratatui".to_string(),
            description: Some("Rust TUI library".to_string()),
            stargazers_count: 12_000,
            forks_count: 400,
            open_issues_count: 90,
            language: Some("Rust".to_string()),
            html_url: "https://github.com/ratatui/ratatui".to_string(),
        }
    }

    #[test]
    fn load_missing_file_is_empty_cache() {
        let cache = RepoMetaCache::load(Path::new("/nonexistent/github-meta.json")).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn save_then_load_preserves_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("github-meta.json");

        let mut cache = RepoMetaCache::new();
        let key = RepoKey::from_url("https://github.com/ratatui/ratatui").unwrap();
        cache.insert(&key, sample());
        cache.save(&path).unwrap();

        let loaded = RepoMetaCache::load(&path).unwrap();
        assert_eq!(loaded, cache);
    }

    #[test]
    fn file_format_is_object_keyed_by_repo() {
        let mut cache = RepoMetaCache::new();
        let key = RepoKey::from_url("https://github.com/ratatui/ratatui").unwrap();
        cache.insert(&key, sample());

        let value = serde_json::to_value(&cache).unwrap();
        assert_eq!(value["ratatui/ratatui"]["stargazers_count"], 12_000);
        assert_eq!(value["ratatui/ratatui"]["language"], "Rust");
    }

    #[test]
    fn lookup_url_resolves_through_repo_key() {
        let mut cache = RepoMetaCache::new();
        let key = RepoKey::from_url("https://github.com/ratatui/ratatui").unwrap();
        cache.insert(&key, sample());

        let found = cache.lookup_url("https://github.com/ratatui/ratatui/issues");
        assert_eq!(found.map(|m| m.full_name.as_str()), Some("ratatui/ratatui"));
        assert!(cache.lookup_url("https://github.com/other/repo").is_none());
    }

    #[test]
    fn load_invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        match RepoMetaCache::load(&path) {
            Err(MetaError::InvalidCache { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected InvalidCache, got {:?}", other),
        }
    }

    #[test]
    fn null_description_and_language_are_accepted() {
        let json = r#"{"a/b": {"full_name": "a/b", "description": null,
            "stargazers_count": 1, "forks_count": 0, "open_issues_count": 0,
            "language": null, "html_url": "https://github.com/a/b"}}"#;
        let cache: RepoMetaCache = serde_json::from_str(json).unwrap();
        assert_eq!(cache.len(), 1);
    }
}
