//! Masonry layout engine.
//!
//! Distributes an ordered sequence of cards across `N` columns by greedy
//! shortest-column placement. The partition is a pure function of
//! (visible sequence, column count, height snapshot) and is always recomputed
//! from scratch; nothing here keeps state between calls.
//!
//! # Algorithm
//!
//! For each item in order, find the column with the smallest running total
//! (ties go to the lowest index), append the item there, and add its height
//! to that total. O(items × columns).

use crate::model::{Post, Slug};
use crate::view_state::heights::HeightRecord;

/// Characters of body text per estimated height unit.
pub const CHARS_PER_HEIGHT_UNIT: f64 = 600.0;
/// Height units added for a card with an image.
pub const IMAGE_HEIGHT_BONUS: f64 = 3.0;
/// Height units added for a card with a video.
pub const VIDEO_HEIGHT_BONUS: f64 = 4.0;

/// Estimated height of a post that has not been measured yet.
///
/// `1 + body_chars / 600 + (image ? 3 : 0) + (video ? 4 : 0)`
pub fn estimate_height(post: &Post) -> f64 {
    let mut estimate = 1.0 + post.body_len() as f64 / CHARS_PER_HEIGHT_UNIT;
    if post.has_image() {
        estimate += IMAGE_HEIGHT_BONUS;
    }
    if post.has_video() {
        estimate += VIDEO_HEIGHT_BONUS;
    }
    estimate
}

/// Heights that cannot be summed meaningfully count as zero.
fn sanitize(height: f64) -> f64 {
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}

/// Greedy shortest-column partition over a slice of heights.
///
/// Returns the item indices per column and the final column totals.
/// `column_count` is clamped to at least 1.
pub fn partition_indices(heights: &[f64], column_count: usize) -> (Vec<Vec<usize>>, Vec<f64>) {
    let n = column_count.max(1);
    let mut columns: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut totals = vec![0.0_f64; n];

    for (index, &height) in heights.iter().enumerate() {
        let mut shortest = 0;
        for col in 1..n {
            if totals[col] < totals[shortest] {
                shortest = col;
            }
        }
        columns[shortest].push(index);
        totals[shortest] += sanitize(height);
    }

    (columns, totals)
}

/// Partition `items` into `column_count` columns using `height_of` for each item.
///
/// Every item appears in exactly one column and each column preserves the
/// relative input order.
pub fn partition<T, F>(items: &[T], column_count: usize, mut height_of: F) -> Vec<Vec<T>>
where
    T: Clone,
    F: FnMut(&T) -> f64,
{
    let heights: Vec<f64> = items.iter().map(&mut height_of).collect();
    let (columns, _) = partition_indices(&heights, column_count);
    columns
        .into_iter()
        .map(|col| col.into_iter().map(|i| items[i].clone()).collect())
        .collect()
}

/// Result of a layout pass: slugs per column plus the totals used to build them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnAssignment {
    columns: Vec<Vec<Slug>>,
    totals: Vec<f64>,
}

impl ColumnAssignment {
    /// Lay out `posts` in display order.
    ///
    /// Measured heights come from `heights`; unmeasured posts use
    /// [`estimate_height`].
    pub fn compute(posts: &[&Post], column_count: usize, heights: &HeightRecord) -> Self {
        let snapshot: Vec<f64> = posts
            .iter()
            .map(|post| heights.height_or_estimate(post))
            .collect();
        let (indices, totals) = partition_indices(&snapshot, column_count);
        let columns = indices
            .into_iter()
            .map(|col| col.into_iter().map(|i| posts[i].slug().clone()).collect())
            .collect();
        Self { columns, totals }
    }

    /// Empty assignment with `column_count` columns.
    pub fn empty(column_count: usize) -> Self {
        let n = column_count.max(1);
        Self {
            columns: vec![Vec::new(); n],
            totals: vec![0.0; n],
        }
    }

    /// Column sequences, left to right.
    pub fn columns(&self) -> &[Vec<Slug>] {
        &self.columns
    }

    /// Slugs in column `index`.
    pub fn column(&self, index: usize) -> Option<&[Slug]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Column heights accumulated during the partition.
    pub fn totals(&self) -> &[f64] {
        &self.totals
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of placed cards.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Whether no card is placed.
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Column and row of `slug`, if placed.
    pub fn position_of(&self, slug: &Slug) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(col, slugs)| {
            slugs.iter().position(|s| s == slug).map(|row| (col, row))
        })
    }

    /// Slug at `(column, row)`.
    pub fn get(&self, column: usize, row: usize) -> Option<&Slug> {
        self.columns.get(column).and_then(|slugs| slugs.get(row))
    }

    /// First card in reading order (top of the leftmost non-empty column).
    pub fn first(&self) -> Option<&Slug> {
        self.columns.iter().find_map(|col| col.first())
    }
}

#[cfg(test)]
#[path = "masonry_tests.rs"]
mod tests;
