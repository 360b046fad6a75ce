//! Filter bar: tag chips on the first row, type chips on the second.

use crate::model::PostType;
use crate::state::Filters;
use crate::view::styles::UiPalette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

/// Tag and type filter chips.
pub struct FilterBar<'a> {
    tags: &'a [String],
    filters: &'a Filters,
    palette: &'a UiPalette,
}

impl<'a> FilterBar<'a> {
    /// Chips for `tags` and every post type, highlighting `filters`.
    pub fn new(tags: &'a [String], filters: &'a Filters, palette: &'a UiPalette) -> Self {
        Self {
            tags,
            filters,
            palette,
        }
    }

    fn chip(&self, label: &str, active: bool) -> Span<'static> {
        let style = if active {
            self.palette.active_chip
        } else {
            self.palette.chip
        };
        Span::styled(format!(" {label} "), style)
    }

    /// Chips for `options`, scrolled so the active one is always drawn.
    fn chip_row<'s>(
        &self,
        label: &'static str,
        options: impl Iterator<Item = (&'s str, bool)>,
        width: u16,
    ) -> Line<'static> {
        let mut chips = vec![self.chip("All", true)];
        let mut active_index = 0;
        for (name, active) in options {
            if active {
                chips[0] = self.chip("All", false);
                active_index = chips.len();
            }
            chips.push(self.chip(name, active));
        }

        let prefix = Span::styled(format!("{label} "), self.palette.muted);
        let budget = usize::from(width).saturating_sub(prefix.width() + 1);

        // Drop leading chips until the active one fits.
        let mut start = 0;
        while start < active_index
            && chips[start..=active_index]
                .iter()
                .map(|c| c.width())
                .sum::<usize>()
                > budget
        {
            start += 1;
        }

        let mut spans = vec![prefix];
        if start > 0 {
            spans.push(Span::styled("…", self.palette.muted));
        }
        spans.extend(chips.into_iter().skip(start));
        Line::from(spans)
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let selected_tag = self.filters.tag();
        let tag_row = self.chip_row(
            "Tags:",
            self.tags
                .iter()
                .map(|t| (t.as_str(), selected_tag == Some(t.as_str()))),
            area.width,
        );
        buf.set_line(area.x, area.y, &tag_row, area.width);

        if area.height > 1 {
            let selected_type = self.filters.post_type();
            let type_row = self.chip_row(
                "Type:",
                PostType::ALL
                    .iter()
                    .map(|t| (t.as_str(), selected_type == Some(*t))),
                area.width,
            );
            buf.set_line(area.x, area.y + 1, &type_row, area.width);
        }
    }
}
