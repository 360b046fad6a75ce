//! ColumnOffsets - per-column row offsets via a Fenwick tree.
//!
//! Each masonry column stacks cards of known row heights. This index answers
//! "where does card `i` start" and "which card covers row `y`" in O(log n),
//! which drives scroll-to-focus and mouse hit-testing.
//!
//! # Complexity
//!
//! - `from_heights`: O(n log n)
//! - `set`: O(log n)
//! - `offset_of` / `end_of`: O(log n)
//! - `index_at`: O(log² n)

/// Cumulative card heights for one column.
#[derive(Debug, Clone, Default)]
pub struct ColumnOffsets {
    /// Fenwick tree storage, sized exactly to the number of cards.
    tree: Vec<isize>,
}

impl ColumnOffsets {
    /// Build the index for a column of cards with the given heights in rows.
    ///
    /// ```
    /// # use cardflow::view_state::height_index::ColumnOffsets;
    /// let offsets = ColumnOffsets::from_heights(&[4, 6, 3]);
    /// assert_eq!(offsets.offset_of(2), 10);
    /// assert_eq!(offsets.total(), 13);
    /// ```
    pub fn from_heights(heights: &[usize]) -> Self {
        let mut tree = vec![0; heights.len()];
        for (i, &h) in heights.iter().enumerate() {
            fenwick::array::update(&mut tree, i, h as isize);
        }
        Self { tree }
    }

    /// Number of cards in the column.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the column is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Height of card `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn height(&self, index: usize) -> usize {
        self.end_of(index) - self.offset_of(index)
    }

    /// Replace the height of card `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, height: usize) {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );
        let delta = height as isize - self.height(index) as isize;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// First row of card `index` (sum of the heights above it).
    ///
    /// `offset_of(len())` is the column total.
    pub fn offset_of(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.end_of(index - 1)
        }
    }

    /// One past the last row of card `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn end_of(&self, index: usize) -> usize {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );
        fenwick::array::prefix_sum(&self.tree, index).max(0) as usize
    }

    /// Card covering row `y`, or `None` past the end of the column.
    ///
    /// ```
    /// # use cardflow::view_state::height_index::ColumnOffsets;
    /// let offsets = ColumnOffsets::from_heights(&[10, 20, 15]);
    /// assert_eq!(offsets.index_at(0), Some(0));
    /// assert_eq!(offsets.index_at(10), Some(1));
    /// assert_eq!(offsets.index_at(44), Some(2));
    /// assert_eq!(offsets.index_at(45), None);
    /// ```
    pub fn index_at(&self, y: usize) -> Option<usize> {
        let mut left = 0;
        let mut right = self.len();
        while left < right {
            let mid = left + (right - left) / 2;
            if self.end_of(mid) > y {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        (left < self.len()).then_some(left)
    }

    /// Total rows in the column.
    pub fn total(&self) -> usize {
        self.offset_of(self.len())
    }
}
