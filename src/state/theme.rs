//! Light / dark / system theme selection.

use serde::Deserialize;
use std::fmt;

/// User-selected theme mode. `System` follows the terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the terminal background.
    #[default]
    System,
    /// Always light.
    Light,
    /// Always dark.
    Dark,
}

/// Concrete appearance after resolving `System`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Appearance {
    /// Dark text on a light background.
    Light,
    /// Light text on a dark background.
    #[default]
    Dark,
}

impl ThemeMode {
    /// system → light → dark → system
    pub fn next(self) -> Self {
        match self {
            ThemeMode::System => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
        }
    }

    /// Config and CLI spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::System => "system",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parse `system`, `light` or `dark`, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "system" => Some(ThemeMode::System),
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Resolve to an appearance, using `system` for [`ThemeMode::System`].
    pub fn resolve(self, system: Appearance) -> Appearance {
        match self {
            ThemeMode::System => system,
            ThemeMode::Light => Appearance::Light,
            ThemeMode::Dark => Appearance::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal background from a `COLORFGBG` value (`"fg;bg"` or `"fg;x;bg"`).
///
/// Background palette index 7 or 15 means light; anything else, or an
/// unset or malformed value, means dark.
pub fn appearance_from_colorfgbg(value: Option<&str>) -> Appearance {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(7) | Some(15) => Appearance::Light,
        _ => Appearance::Dark,
    }
}

/// Appearance of the current terminal, read from the environment.
pub fn detect_system_appearance() -> Appearance {
    appearance_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}
