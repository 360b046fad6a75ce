//! Search input widget for rendering the search bar.

use crate::state::SearchState;
use crate::view::styles::UiPalette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

/// Search input widget.
/// Renders the search bar when in Typing or Active state.
pub struct SearchInput<'a> {
    search_state: &'a SearchState,
    result_count: usize,
    palette: &'a UiPalette,
}

impl<'a> SearchInput<'a> {
    /// Create new SearchInput widget.
    pub fn new(search_state: &'a SearchState, result_count: usize, palette: &'a UiPalette) -> Self {
        Self {
            search_state,
            result_count,
            palette,
        }
    }

    fn block(&self, title: &'static str, border: Style) -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(title)
            .title_bottom(
                Line::from(Span::styled(
                    format!(" {} results ", self.result_count),
                    self.palette.muted,
                ))
                .right_aligned(),
            )
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.search_state {
            SearchState::Typing { query, cursor } => {
                // Split query into before/after cursor for rendering cursor
                let before: String = query.chars().take(*cursor).collect();
                let mut after = query.chars().skip(*cursor);
                let cursor_char = after.next().map_or(" ".to_string(), |c| c.to_string());
                let after_text: String = after.collect();

                let line = Line::from(vec![
                    Span::raw(before),
                    Span::styled(cursor_char, Style::default().add_modifier(Modifier::REVERSED)),
                    Span::raw(after_text),
                ]);
                Paragraph::new(line)
                    .block(self.block(" Search ", self.palette.focused_border))
                    .render(area, buf);
            }
            SearchState::Active { query } => {
                Paragraph::new(Line::from(query.as_str().to_string()))
                    .block(self.block(" Search (active) ", self.palette.border))
                    .render(area, buf);
            }
            SearchState::Inactive => {
                // No search input to show
            }
        }
    }
}
