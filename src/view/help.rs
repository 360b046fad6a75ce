//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by any key.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::UiPalette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut table: category, then (keys, description) rows.
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Focus card below"),
            ("k/↑", "Focus card above"),
            ("h/←", "Focus column to the left"),
            ("l/→", "Focus column to the right"),
            ("Ctrl+d/PgDn", "Page down"),
            ("Ctrl+u/PgUp", "Page up"),
            ("g/Home", "Go to top"),
            ("G/End", "Go to bottom"),
            ("Click", "Focus card"),
            ("Wheel", "Scroll"),
        ],
    ),
    (
        "Cards",
        &[
            ("Enter/Space", "Expand or collapse code"),
            ("c/y", "Copy content or link"),
        ],
    ),
    (
        "Install",
        &[
            ("a", "Add or remove app"),
            ("i", "Copy winget command"),
            ("x", "Clear install list"),
        ],
    ),
    (
        "Search",
        &[
            ("/ or Ctrl+f", "Start search"),
            ("Enter", "Keep results, back to cards"),
            ("Esc", "Clear search"),
        ],
    ),
    (
        "Filters",
        &[
            ("t / T", "Next / previous tag"),
            ("f", "Next type"),
            ("0", "Clear filters"),
        ],
    ),
    (
        "Application",
        &[
            ("m", "Cycle theme (system, light, dark)"),
            ("?", "Toggle this help"),
            ("q/Ctrl+c", "Quit"),
        ],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, palette: &UiPalette) {
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, frame.area());

    // Clear the background for the overlay
    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(palette))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title(" Keyboard Shortcuts ")
                .border_style(palette.focused_border),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);
    frame.render_widget(help_paragraph, popup_area);

    if popup_area.height == 0 {
        return;
    }
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.bottom() - 1,
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        " Press any key to close ",
        palette.muted,
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Build the help content lines grouped by category.
fn build_help_content(palette: &UiPalette) -> Vec<Line<'static>> {
    let category_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let mut lines = Vec::new();

    for (i, (category, rows)) in SHORTCUTS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*category, category_style)));
        for (keys, description) in rows.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<14}"), palette.key),
                Span::raw(*description),
            ]));
        }
    }
    lines
}
