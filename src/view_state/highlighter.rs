//! Syntax highlighting for fenced code blocks using syntect + two-face.
//!
//! The syntax theme follows the gallery appearance (`base16-ocean-dark` or
//! `base16-ocean-light`) unless the config names one explicitly. Any name in
//! [`VALID_THEMES`] is accepted.

use crate::state::Appearance;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::sync::LazyLock;
use syntect::highlighting::FontStyle;
use syntect::parsing::SyntaxSet;
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

/// All valid theme names that can be used in configuration.
pub const VALID_THEMES: &[&str] = &[
    "ansi",
    "base16",
    "base16-256",
    "base16-eighties-dark",
    "base16-mocha-dark",
    "base16-ocean-dark",
    "base16-ocean-light",
    "coldark-cold",
    "coldark-dark",
    "dark-neon",
    "dracula",
    "github",
    "gruvbox-dark",
    "gruvbox-light",
    "inspired-github",
    "leet",
    "monokai",
    "monokai-bright",
    "monokai-light",
    "monokai-origin",
    "nord",
    "one-half-dark",
    "one-half-light",
    "solarized-dark",
    "solarized-light",
    "sublime-snazzy",
    "two-dark",
    "visual-studio-dark-plus",
    "zenburn",
];

/// Syntax theme for dark backgrounds.
pub const DEFAULT_DARK_THEME: &str = "base16-ocean-dark";

/// Syntax theme for light backgrounds.
pub const DEFAULT_LIGHT_THEME: &str = "base16-ocean-light";

static THEME_SET: LazyLock<EmbeddedLazyThemeSet> = LazyLock::new(two_face::theme::extra);

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(two_face::syntax::extra_newlines);

/// Map a theme name string to the corresponding EmbeddedThemeName.
fn theme_name_to_embedded(name: &str) -> Option<EmbeddedThemeName> {
    match name {
        "ansi" => Some(EmbeddedThemeName::Ansi),
        "base16" => Some(EmbeddedThemeName::Base16),
        "base16-256" => Some(EmbeddedThemeName::Base16_256),
        "base16-eighties-dark" => Some(EmbeddedThemeName::Base16EightiesDark),
        "base16-mocha-dark" => Some(EmbeddedThemeName::Base16MochaDark),
        "base16-ocean-dark" => Some(EmbeddedThemeName::Base16OceanDark),
        "base16-ocean-light" => Some(EmbeddedThemeName::Base16OceanLight),
        "coldark-cold" => Some(EmbeddedThemeName::ColdarkCold),
        "coldark-dark" => Some(EmbeddedThemeName::ColdarkDark),
        "dark-neon" => Some(EmbeddedThemeName::DarkNeon),
        "dracula" => Some(EmbeddedThemeName::Dracula),
        "github" => Some(EmbeddedThemeName::Github),
        "gruvbox-dark" => Some(EmbeddedThemeName::GruvboxDark),
        "gruvbox-light" => Some(EmbeddedThemeName::GruvboxLight),
        "inspired-github" => Some(EmbeddedThemeName::InspiredGithub),
        "leet" => Some(EmbeddedThemeName::Leet),
        "monokai" | "monokai-extended" => Some(EmbeddedThemeName::MonokaiExtended),
        "monokai-bright" => Some(EmbeddedThemeName::MonokaiExtendedBright),
        "monokai-light" => Some(EmbeddedThemeName::MonokaiExtendedLight),
        "monokai-origin" => Some(EmbeddedThemeName::MonokaiExtendedOrigin),
        "nord" => Some(EmbeddedThemeName::Nord),
        "one-half-dark" => Some(EmbeddedThemeName::OneHalfDark),
        "one-half-light" => Some(EmbeddedThemeName::OneHalfLight),
        "solarized-dark" => Some(EmbeddedThemeName::SolarizedDark),
        "solarized-light" => Some(EmbeddedThemeName::SolarizedLight),
        "sublime-snazzy" => Some(EmbeddedThemeName::SublimeSnazzy),
        "two-dark" => Some(EmbeddedThemeName::TwoDark),
        "visual-studio-dark-plus" => Some(EmbeddedThemeName::VisualStudioDarkPlus),
        "zenburn" => Some(EmbeddedThemeName::Zenburn),
        _ => None,
    }
}


/// Check if a theme name is valid.
pub fn is_valid_theme(name: &str) -> bool {
    VALID_THEMES.contains(&name)
}

/// Syntax highlighter bound to one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxHighlighter {
    theme_name: &'static str,
}

impl SyntaxHighlighter {
    /// Create a highlighter for `theme_name`, falling back to the dark default.
    pub fn new(theme_name: &str) -> Self {
        let theme_name = VALID_THEMES
            .iter()
            .copied()
            .find(|name| *name == theme_name)
            .unwrap_or(DEFAULT_DARK_THEME);
        Self { theme_name }
    }

    /// Name of the syntax theme in use.
    pub fn theme_name(&self) -> &'static str {
        self.theme_name
    }

    /// Highlighter for an appearance. `configured` wins when it names a theme.
    pub fn for_appearance(appearance: Appearance, configured: Option<&str>) -> Self {
        match configured.filter(|name| is_valid_theme(name)) {
            Some(name) => Self::new(name),
            None => Self::new(match appearance {
                Appearance::Dark => DEFAULT_DARK_THEME,
                Appearance::Light => DEFAULT_LIGHT_THEME,
            }),
        }
    }

    /// Highlight `code`, one output line per source line.
    ///
    /// Unknown or missing languages render as plain text in the theme's
    /// foreground color.
    pub fn highlight_code(&self, code: &str, language: Option<&str>) -> Vec<Line<'static>> {
        use syntect::easy::HighlightLines;
        use syntect::util::LinesWithEndings;

        let embedded =
            theme_name_to_embedded(self.theme_name).unwrap_or(EmbeddedThemeName::Base16OceanDark);
        let theme = THEME_SET.get(embedded);

        let syntax = language
            .and_then(|lang| SYNTAX_SET.find_syntax_by_token(lang))
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &SYNTAX_SET) {
                Ok(highlighted) => {
                    let spans: Vec<Span<'static>> = highlighted
                        .into_iter()
                        .map(|(style, text)| {
                            let text = text.trim_end_matches(['\n', '\r']);
                            Span::styled(text.to_string(), syntect_style_to_ratatui(style))
                        })
                        .filter(|span| !span.content.is_empty())
                        .collect();
                    lines.push(Line::from(spans));
                }
                Err(_) => {
                    lines.push(Line::from(line.trim_end().to_string()));
                }
            }
        }

        lines
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_DARK_THEME)
    }
}

/// Convert syntect highlighting style to ratatui style.
fn syntect_style_to_ratatui(style: syntect::highlighting::Style) -> Style {
    let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);

    let mut ratatui_style = Style::default().fg(fg);

    // Apply font style modifiers
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }

    ratatui_style
}
