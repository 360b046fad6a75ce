//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the title bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the search input widget in lines (border + content).
///
/// Only reserved while a search is being typed or is active.
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the filter bar: one row of tags, one row of types.
pub const FILTER_BAR_HEIGHT: u16 = 2;

/// Height of the status bar in lines.
///
/// Holds the install list summary and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Message shown when no card survives search and filters.
pub const EMPTY_STATE_MESSAGE: &str = "No cards found matching your criteria.";
