//! Configuration file loading with precedence handling.

use crate::source::default_content_dir;
use crate::state::ThemeMode;
use crate::view_state::breakpoints::{Breakpoint, Breakpoints, DEFAULT_CELL_WIDTH_PX};
use crate::view_state::card::DEFAULT_COLLAPSED_CODE_LINES;
use crate::view_state::highlighter::is_valid_theme;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A key parsed but its value is unusable.
    #[error("Invalid value for `{key}`: {reason}")]
    InvalidValue {
        /// Config key with the bad value.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cardflow/config.toml`.
///
/// ```toml
/// content_dir = "content/posts"
/// theme = "dark"
/// syntax_theme = "gruvbox-dark"
///
/// [[breakpoints]]
/// min_width = 1600
/// columns = 5
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory of markdown posts.
    #[serde(default)]
    pub content_dir: Option<PathBuf>,

    /// Repository metadata cache written by `fetch-meta`.
    #[serde(default)]
    pub meta_path: Option<PathBuf>,

    /// `system`, `light` or `dark`.
    #[serde(default)]
    pub theme: Option<ThemeMode>,

    /// Code block theme. Follows the appearance when unset.
    #[serde(default)]
    pub syntax_theme: Option<String>,

    /// Pixel width of one terminal cell for breakpoint matching.
    #[serde(default)]
    pub cell_width_px: Option<u32>,

    /// Code lines shown before a block collapses.
    #[serde(default)]
    pub collapsed_code_lines: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Replaces the default breakpoint table.
    #[serde(default)]
    pub breakpoints: Option<Vec<Breakpoint>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Directory of markdown posts.
    pub content_dir: PathBuf,
    /// Repository metadata cache file.
    pub meta_path: PathBuf,
    /// Initial theme mode.
    pub theme: ThemeMode,
    /// Explicit syntax theme; follows the appearance when `None`.
    pub syntax_theme: Option<String>,
    /// Width of one terminal cell in pixel equivalents.
    pub cell_width_px: u32,
    /// Code lines shown before a block is collapsed.
    pub collapsed_code_lines: usize,
    /// Viewport width to column count table.
    pub breakpoints: Breakpoints,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            meta_path: default_meta_path(),
            theme: ThemeMode::default(),
            syntax_theme: None,
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            collapsed_code_lines: DEFAULT_COLLAPSED_CODE_LINES,
            breakpoints: Breakpoints::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cardflow/cardflow.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("cardflow").join("cardflow.log")
    } else {
        PathBuf::from("cardflow.log")
    }
}

/// Default metadata cache location.
///
/// `src/data/github-meta.json` in a site checkout, `data/github-meta.json`
/// otherwise.
pub fn default_meta_path() -> PathBuf {
    if Path::new("src").join("content").is_dir() {
        Path::new("src").join("data").join("github-meta.json")
    } else {
        Path::new("data").join("github-meta.json")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/cardflow/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cardflow").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `CARDFLOW_CONFIG` environment variable
/// 3. Default path `~/.config/cardflow/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("CARDFLOW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Reject values that parse but cannot be used.
pub fn validate_config(config: &ConfigFile) -> Result<(), ConfigError> {
    if let Some(name) = &config.syntax_theme {
        if !is_valid_theme(name) {
            return Err(ConfigError::InvalidValue {
                key: "syntax_theme",
                reason: format!("unknown theme `{name}`"),
            });
        }
    }
    if config.cell_width_px == Some(0) {
        return Err(ConfigError::InvalidValue {
            key: "cell_width_px",
            reason: "must be at least 1".to_string(),
        });
    }
    if config.breakpoints.as_ref().is_some_and(Vec::is_empty) {
        return Err(ConfigError::InvalidValue {
            key: "breakpoints",
            reason: "must list at least one breakpoint".to_string(),
        });
    }
    Ok(())
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        content_dir: config.content_dir.unwrap_or(defaults.content_dir),
        meta_path: config.meta_path.unwrap_or(defaults.meta_path),
        theme: config.theme.unwrap_or(defaults.theme),
        syntax_theme: config.syntax_theme.or(defaults.syntax_theme),
        cell_width_px: config.cell_width_px.unwrap_or(defaults.cell_width_px),
        collapsed_code_lines: config
            .collapsed_code_lines
            .unwrap_or(defaults.collapsed_code_lines),
        breakpoints: config
            .breakpoints
            .map(Breakpoints::new)
            .unwrap_or(defaults.breakpoints),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CARDFLOW_CONTENT_DIR`: Override the content directory
/// - `CARDFLOW_THEME`: Override the theme mode (ignored with a warning when invalid)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(dir) = std::env::var("CARDFLOW_CONTENT_DIR") {
        if !dir.trim().is_empty() {
            config.content_dir = PathBuf::from(dir);
        }
    }

    if let Ok(theme) = std::env::var("CARDFLOW_THEME") {
        match ThemeMode::parse(&theme) {
            Some(mode) => config.theme = mode,
            None => warn!(value = %theme, "Ignoring invalid CARDFLOW_THEME"),
        }
    }

    config
}

/// Values given on the command line. `None` leaves the resolved value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--content-dir`
    pub content_dir: Option<PathBuf>,
    /// `--meta`
    pub meta_path: Option<PathBuf>,
    /// `--theme`
    pub theme: Option<ThemeMode>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(dir) = cli.content_dir {
        config.content_dir = dir;
    }
    if let Some(path) = cli.meta_path {
        config.meta_path = path;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config
}

/// Full precedence chain: file, validation, env, CLI.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    cli: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    if let Some(file) = &file {
        validate_config(file)?;
    }
    Ok(apply_cli_overrides(
        apply_env_overrides(merge_config(file)),
        cli,
    ))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_cardflow_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("cardflow.log"),
            "Default log path should end with 'cardflow.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(
            !config.log_file_path.as_os_str().is_empty(),
            "Default config should have non-empty log_file_path"
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(resolved.log_file_path, custom_path);
    }

    #[test]
    fn default_meta_path_names_cache_file() {
        assert!(default_meta_path().ends_with("github-meta.json"));
    }
}
