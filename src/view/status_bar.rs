//! Bottom bar: install list summary on the left, key hints on the right.

use crate::view::styles::UiPalette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

/// Bottom row: install list summary or flash message, then key hints.
pub struct StatusBar<'a> {
    install_count: usize,
    flash: Option<&'a str>,
    palette: &'a UiPalette,
}

impl<'a> StatusBar<'a> {
    /// `flash` is an install bar confirmation that replaces the summary.
    pub fn new(install_count: usize, flash: Option<&'a str>, palette: &'a UiPalette) -> Self {
        Self {
            install_count,
            flash,
            palette,
        }
    }

    fn summary(&self) -> Line<'static> {
        if let Some(message) = self.flash {
            return Line::from(Span::styled(format!(" ✓ {message}"), self.palette.notice));
        }
        if self.install_count == 0 {
            return Line::default();
        }
        let noun = if self.install_count == 1 { "app" } else { "apps" };
        Line::from(vec![
            Span::styled(
                format!(" Install list: {} {noun} ", self.install_count),
                self.palette.notice,
            ),
            Span::styled("[i]", self.palette.key),
            Span::raw(" copy winget command "),
            Span::styled("[x]", self.palette.key),
            Span::raw(" clear"),
        ])
    }

    fn hints(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (key, label) in [("/", "search"), ("?", "help"), ("q", "quit")] {
            spans.push(Span::styled(format!("[{key}]"), self.palette.key));
            spans.push(Span::styled(format!(" {label} "), self.palette.muted));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let hints = self.hints();
        let hints_width = u16::try_from(hints.width()).unwrap_or(u16::MAX);
        let summary = self.summary();

        buf.set_line(area.x, area.y, &summary, area.width);
        let summary_width = u16::try_from(summary.width()).unwrap_or(u16::MAX);
        if summary_width.saturating_add(hints_width) < area.width {
            buf.set_line(area.right() - hints_width, area.y, &hints, hints_width);
        }
    }
}
