//! Keyboard action dispatch.
//!
//! Pure function that applies a [`KeyAction`] to [`GalleryState`]. Effects the
//! state cannot perform itself (clipboard, exit) are returned to the shell.

use crate::model::KeyAction;
use crate::state::GalleryState;
use std::time::Instant;

/// Side effect requested by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// State changed (or not); nothing else to do.
    None,
    /// Place this text on the clipboard.
    Copy(String),
    /// Leave the event loop.
    Quit,
}

/// Apply `action` to `state`.
///
/// While the help overlay is open every action except Help and Quit closes it.
pub fn handle_action(state: &mut GalleryState, action: KeyAction, now: Instant) -> ActionOutcome {
    if state.help_visible && !matches!(action, KeyAction::Help | KeyAction::Quit) {
        state.help_visible = false;
        return ActionOutcome::None;
    }

    match action {
        KeyAction::FocusDown => state.focus_down(),
        KeyAction::FocusUp => state.focus_up(),
        KeyAction::FocusLeft => state.focus_left(),
        KeyAction::FocusRight => state.focus_right(),
        KeyAction::PageDown => state.page(true),
        KeyAction::PageUp => state.page(false),
        KeyAction::ScrollToTop => state.scroll_to_top(),
        KeyAction::ScrollToBottom => state.scroll_to_bottom(),
        KeyAction::ToggleExpand => state.toggle_expand(),
        KeyAction::CopyCard => {
            return state
                .copy_focused(now)
                .map_or(ActionOutcome::None, ActionOutcome::Copy)
        }
        KeyAction::ToggleInstall => state.toggle_install(),
        KeyAction::CopyInstallCommand => {
            return state
                .copy_install_command(now)
                .map_or(ActionOutcome::None, ActionOutcome::Copy)
        }
        KeyAction::ClearInstallList => state.clear_install_list(),
        KeyAction::StartSearch => state.start_search(),
        KeyAction::CancelSearch => state.cancel_search(),
        KeyAction::NextTag => state.next_tag(),
        KeyAction::PrevTag => state.prev_tag(),
        KeyAction::NextType => state.next_type(),
        KeyAction::ClearFilters => state.clear_filters(),
        KeyAction::CycleTheme => state.cycle_theme(),
        KeyAction::Help => state.toggle_help(),
        KeyAction::Quit => return ActionOutcome::Quit,
    }
    ActionOutcome::None
}
