//! Screen geometry of the masonry columns.
//!
//! All columns share one width so a card measures the same wherever the
//! layout places it. Leftover cells stay at the right edge.

use ratatui::layout::Rect;

/// Gap between adjacent columns, in cells.
pub const COLUMN_GAP: u16 = 1;

/// Column rectangles inside the gallery area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    area: Rect,
    columns: u16,
    column_width: u16,
}

impl GridGeometry {
    /// Split `area` into `columns` equal columns separated by gaps.
    pub fn new(area: Rect, columns: usize) -> Self {
        let columns = u16::try_from(columns.max(1)).unwrap_or(u16::MAX);
        let gaps = COLUMN_GAP.saturating_mul(columns - 1);
        let column_width = area.width.saturating_sub(gaps) / columns;
        Self {
            area,
            columns,
            column_width,
        }
    }

    /// Width of every column in cells.
    pub fn column_width(&self) -> u16 {
        self.column_width
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        usize::from(self.columns)
    }

    /// Full-height rectangle of column `index`.
    pub fn column_rect(&self, index: usize) -> Rect {
        let index = u16::try_from(index).unwrap_or(u16::MAX);
        let x = self
            .area
            .x
            .saturating_add(index.saturating_mul(self.column_width + COLUMN_GAP));
        Rect::new(x, self.area.y, self.column_width, self.area.height)
    }

    /// Column under screen column `x`, ignoring gaps and the right margin.
    pub fn column_at(&self, x: u16) -> Option<usize> {
        if x < self.area.x || self.column_width == 0 {
            return None;
        }
        let rel = x - self.area.x;
        let stride = self.column_width + COLUMN_GAP;
        let index = rel / stride;
        let within = rel % stride;
        (index < self.columns && within < self.column_width).then_some(usize::from(index))
    }

    /// Whether screen row `y` is inside the grid.
    pub fn contains_row(&self, y: u16) -> bool {
        y >= self.area.y && y < self.area.y.saturating_add(self.area.height)
    }

    /// Area covered by the grid.
    pub fn area(&self) -> Rect {
        self.area
    }
}
