//! Cache of rendered card bodies.
//!
//! Rendering a card runs markdown parsing and syntax highlighting, and the
//! shell measures every visible card each frame. Bodies are cached per
//! combination of inputs that changes their rows.

use crate::model::Slug;
use crate::state::Appearance;
use ratatui::text::Line;
use std::collections::HashMap;
use tracing::trace;

/// Default maximum number of cached bodies.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Everything that affects a rendered card body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderCacheKey {
    /// Card identity.
    pub slug: Slug,
    /// Inner width in cells.
    pub width: u16,
    /// Whether code blocks are shown in full.
    pub expanded: bool,
    /// Resolved theme.
    pub appearance: Appearance,
}

impl RenderCacheKey {
    /// Key for one rendering of `slug`.
    pub fn new(slug: Slug, width: u16, expanded: bool, appearance: Appearance) -> Self {
        Self {
            slug,
            width,
            expanded,
            appearance,
        }
    }
}

/// Bounded body cache. Dropped wholesale when full; a resize invalidates
/// most entries at once anyway.
#[derive(Debug)]
pub struct RenderCache {
    entries: HashMap<RenderCacheKey, Vec<Line<'static>>>,
    capacity: usize,
}

impl RenderCache {
    /// Cache holding at most `capacity` bodies.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Cached body for `key`.
    pub fn get(&self, key: &RenderCacheKey) -> Option<&[Line<'static>]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Cached body for `key`, rendering it with `render` on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: RenderCacheKey, render: F) -> &[Line<'static>]
    where
        F: FnOnce() -> Vec<Line<'static>>,
    {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            trace!(entries = self.entries.len(), "Render cache full, clearing");
            self.entries.clear();
        }
        self.entries.entry(key).or_insert_with(render)
    }

    /// Number of cached bodies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached body.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
