//! Responsive column count from viewport width.
//!
//! Widths are in pixel equivalents. Terminal cells are converted with a
//! configurable cell width so the familiar 640/1024/1280 breakpoints apply.

use serde::Deserialize;

/// Default pixel width of one terminal cell.
pub const DEFAULT_CELL_WIDTH_PX: u32 = 8;

/// One row of the breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    /// Smallest width (inclusive) for which `columns` applies.
    pub min_width: u32,
    /// Column count at or above `min_width`.
    pub columns: usize,
}

/// Width to column-count table, largest threshold first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoints {
    table: Vec<Breakpoint>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new(vec![
            Breakpoint {
                min_width: 1280,
                columns: 4,
            },
            Breakpoint {
                min_width: 1024,
                columns: 3,
            },
            Breakpoint {
                min_width: 640,
                columns: 2,
            },
        ])
    }
}

impl Breakpoints {
    /// Build a table from entries in any order. Zero column counts are raised to 1.
    pub fn new(mut table: Vec<Breakpoint>) -> Self {
        for entry in &mut table {
            entry.columns = entry.columns.max(1);
        }
        table.sort_by(|a, b| b.min_width.cmp(&a.min_width));
        Self { table }
    }

    /// Column count for a width in pixels. Below every threshold: 1.
    pub fn columns_for_px(&self, width_px: u32) -> usize {
        self.table
            .iter()
            .find(|bp| width_px >= bp.min_width)
            .map_or(1, |bp| bp.columns)
    }

    /// Column count for a terminal width in cells.
    pub fn columns_for_cells(&self, width_cells: u16, cell_width_px: u32) -> usize {
        self.columns_for_px(cells_to_px(width_cells, cell_width_px))
    }

    /// Entries, widest first.
    pub fn entries(&self) -> &[Breakpoint] {
        &self.table
    }
}

/// Convert terminal cells to pixel equivalents. A zero cell width is treated as 1.
pub fn cells_to_px(width_cells: u16, cell_width_px: u32) -> u32 {
    u32::from(width_cells).saturating_mul(cell_width_px.max(1))
}
