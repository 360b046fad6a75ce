//! Mouse event handler.
//!
//! Pure functions that transform GalleryState in response to mouse events.

use crate::state::GalleryState;
use crate::view_state::grid::GridGeometry;

/// Rows scrolled per wheel notch.
pub const WHEEL_SCROLL_ROWS: isize = 3;

/// Result of mapping a click to the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridClick {
    /// Click landed in `column` at content row `y` (scroll included).
    Column {
        /// Column index.
        column: usize,
        /// Content row, scroll included.
        y: usize,
    },
    /// Click was outside every column.
    Outside,
}

/// Map a screen position to a grid column and content row.
pub fn detect_grid_click(x: u16, y: u16, grid: &GridGeometry, scroll: usize) -> GridClick {
    if !grid.contains_row(y) {
        return GridClick::Outside;
    }
    match grid.column_at(x) {
        Some(column) => GridClick::Column {
            column,
            y: scroll + usize::from(y - grid.area().y),
        },
        None => GridClick::Outside,
    }
}

/// Focus the card under a left click.
pub fn handle_click(state: &mut GalleryState, x: u16, y: u16, grid: &GridGeometry) {
    if let GridClick::Column { column, y } = detect_grid_click(x, y, grid, state.scroll()) {
        state.focus_at(column, y);
    }
}

/// Scroll the gallery by one wheel notch.
pub fn handle_wheel(state: &mut GalleryState, down: bool) {
    state.scroll_by(if down {
        WHEEL_SCROLL_ROWS
    } else {
        -WHEEL_SCROLL_ROWS
    });
}
