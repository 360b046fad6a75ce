//! Measured card heights, keyed by slug.

use crate::model::{Post, Slug};
use crate::view_state::masonry::estimate_height;
use std::collections::HashMap;

/// Last measured height of each card seen this session.
///
/// Entries are created on first measurement and overwritten afterwards. They
/// are never removed, so a card hidden by a filter keeps its height for when
/// it becomes visible again.
#[derive(Debug, Clone, Default)]
pub struct HeightRecord {
    heights: HashMap<Slug, f64>,
}

impl HeightRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a measurement. Returns `true` when the stored value changed.
    ///
    /// Non-finite and non-positive values are not measurements: they are
    /// ignored, so the card keeps its previous height or its estimate.
    pub fn report(&mut self, slug: &Slug, height: f64) -> bool {
        if !height.is_finite() || height <= 0.0 {
            return false;
        }
        match self.heights.get_mut(slug) {
            Some(stored) if *stored == height => false,
            Some(stored) => {
                *stored = height;
                true
            }
            None => {
                self.heights.insert(slug.clone(), height);
                true
            }
        }
    }

    /// Last measured height of `slug`, if any.
    pub fn get(&self, slug: &Slug) -> Option<f64> {
        self.heights.get(slug).copied()
    }

    /// Measured height, or the estimate when the card was never measured.
    pub fn height_or_estimate(&self, post: &Post) -> f64 {
        self.get(post.slug()).unwrap_or_else(|| estimate_height(post))
    }

    /// Number of measured cards.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Whether no card has been measured yet.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}
