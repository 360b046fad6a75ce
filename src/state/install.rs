//! Batch install list for winget-installable apps.

use crate::model::{Post, Slug};
use std::collections::HashSet;

/// Slugs of apps the user picked for batch install.
#[derive(Debug, Clone, Default)]
pub struct InstallSelection {
    selected: HashSet<Slug>,
}

impl InstallSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove `post`. Posts without an install id are ignored.
    ///
    /// Returns whether the post is selected afterwards.
    pub fn toggle(&mut self, post: &Post) -> bool {
        if post.install_id().is_none() {
            return false;
        }
        if self.selected.remove(post.slug()) {
            false
        } else {
            self.selected.insert(post.slug().clone());
            true
        }
    }

    /// Whether `slug` is selected.
    pub fn contains(&self, slug: &Slug) -> bool {
        self.selected.contains(slug)
    }

    /// Number of selected apps.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

/// Shell command installing every selected package, or `None` when nothing
/// installable is selected.
///
/// Packages appear in collection order. Invocations are joined with `; ` so
/// a failing package does not stop the rest.
pub fn install_command(posts: &[Post], selection: &InstallSelection) -> Option<String> {
    let commands: Vec<String> = posts
        .iter()
        .filter(|post| selection.contains(post.slug()))
        .filter_map(Post::install_id)
        .map(|id| format!("winget install --id {id} -e"))
        .collect();

    (!commands.is_empty()).then(|| commands.join("; "))
}
