//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod action_handler;
pub mod app_state;
pub mod card_action;
pub mod filters;
pub mod install;
pub mod mouse_handler;
pub mod search;
pub mod search_input_handler;
pub mod theme;

// Re-export for convenience
pub use action_handler::{handle_action, ActionOutcome};
pub use app_state::{Flash, FlashTarget, GalleryOptions, GalleryState, COPY_CONFIRMATION};
pub use card_action::{card_action, copy_payload, CardAction, InstallAvailability};
pub use filters::Filters;
pub use install::{install_command, InstallSelection};
pub use search::{SearchIndex, SearchQuery, SearchState};
pub use theme::{Appearance, ThemeMode};
