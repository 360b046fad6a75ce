//! Chrome styling: borders, filter chips, and muted text.
//!
//! Card content colors come from the card renderer; this module covers the
//! frame around it.

use crate::state::Appearance;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colors off.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== UiPalette =====

/// Styles for gallery chrome under one appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiPalette {
    /// Unfocused card border.
    pub border: Style,
    /// Focused card border.
    pub focused_border: Style,
    /// Border of an app on the install list.
    pub selected_border: Style,
    /// Titles and headings.
    pub title: Style,
    /// Secondary text.
    pub muted: Style,
    /// Key hints.
    pub key: Style,
    /// Inactive filter chip.
    pub chip: Style,
    /// Active filter chip.
    pub active_chip: Style,
    /// Flash messages.
    pub notice: Style,
}

impl UiPalette {
    /// Palette for `appearance`, reduced to modifiers without colors.
    pub fn new(appearance: Appearance, colors: ColorConfig) -> Self {
        let muted = Style::default().add_modifier(Modifier::DIM);
        let bold = Style::default().add_modifier(Modifier::BOLD);

        if !colors.colors_enabled() {
            return Self {
                border: muted,
                focused_border: bold,
                selected_border: bold,
                title: bold,
                muted,
                key: bold,
                chip: Style::default(),
                active_chip: Style::default().add_modifier(Modifier::REVERSED),
                notice: bold,
            };
        }

        let (border, accent, key) = match appearance {
            Appearance::Dark => (Color::DarkGray, Color::Cyan, Color::Yellow),
            Appearance::Light => (Color::Gray, Color::Blue, Color::Magenta),
        };

        Self {
            border: Style::default().fg(border),
            focused_border: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            selected_border: Style::default().fg(Color::Green),
            title: bold.fg(accent),
            muted,
            key: Style::default().fg(key).add_modifier(Modifier::BOLD),
            chip: Style::default(),
            active_chip: Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            notice: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        }
    }
}

// ===== Tests =====
