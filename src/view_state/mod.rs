//! View-state layer - layout, measurement, and card rendering
//!
//! This module turns posts into positioned, measured cards. Nothing here
//! touches the terminal.
//!
//! # Module Structure
//!
//! - `masonry`: ColumnAssignment - greedy shortest-column partition
//! - `heights`: HeightRecord - last measured height per card
//! - `breakpoints`: Breakpoints - viewport width to column count
//! - `grid`: GridGeometry - screen rectangles of the columns
//! - `height_index`: ColumnOffsets - O(log n) prefix sums via Fenwick tree
//! - `card`: card content rows, footer row, and measurement
//! - `cache`: RenderCache - rendered bodies keyed by width and state
//! - `highlighter`: syntax highlighting for fenced code
//! - `wrap`: styled word wrapping

pub mod breakpoints;
pub mod cache;
pub mod card;
pub mod grid;
pub mod height_index;
pub mod heights;
pub mod highlighter;
pub mod masonry;
pub mod wrap;
