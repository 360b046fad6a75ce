//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings. Search text entry bypasses this
/// table; see the event loop.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event. Event kind and state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Bind `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyCode::*;
        const NONE: KeyModifiers = KeyModifiers::NONE;
        const SHIFT: KeyModifiers = KeyModifiers::SHIFT;
        const CTRL: KeyModifiers = KeyModifiers::CONTROL;

        let table = [
            // Card focus
            (Char('j'), NONE, KeyAction::FocusDown),
            (Down, NONE, KeyAction::FocusDown),
            (Char('k'), NONE, KeyAction::FocusUp),
            (Up, NONE, KeyAction::FocusUp),
            (Char('h'), NONE, KeyAction::FocusLeft),
            (Left, NONE, KeyAction::FocusLeft),
            (Char('l'), NONE, KeyAction::FocusRight),
            (Right, NONE, KeyAction::FocusRight),
            // Page navigation
            (Char('d'), CTRL, KeyAction::PageDown),
            (PageDown, NONE, KeyAction::PageDown),
            (Char('u'), CTRL, KeyAction::PageUp),
            (PageUp, NONE, KeyAction::PageUp),
            (Char('g'), NONE, KeyAction::ScrollToTop),
            (Home, NONE, KeyAction::ScrollToTop),
            (Char('G'), SHIFT, KeyAction::ScrollToBottom),
            (End, NONE, KeyAction::ScrollToBottom),
            // Card interaction
            (Enter, NONE, KeyAction::ToggleExpand),
            (Char(' '), NONE, KeyAction::ToggleExpand),
            (Char('c'), NONE, KeyAction::CopyCard),
            (Char('y'), NONE, KeyAction::CopyCard),
            (Char('a'), NONE, KeyAction::ToggleInstall),
            (Char('i'), NONE, KeyAction::CopyInstallCommand),
            (Char('x'), NONE, KeyAction::ClearInstallList),
            // Search
            (Char('/'), NONE, KeyAction::StartSearch),
            (Char('f'), CTRL, KeyAction::StartSearch),
            (Esc, NONE, KeyAction::CancelSearch),
            // Filters
            (Char('t'), NONE, KeyAction::NextTag),
            (Char('T'), SHIFT, KeyAction::PrevTag),
            (Char('f'), NONE, KeyAction::NextType),
            (Char('0'), NONE, KeyAction::ClearFilters),
            // Application controls
            (Char('m'), NONE, KeyAction::CycleTheme),
            (Char('?'), NONE, KeyAction::Help),
            (Char('?'), SHIFT, KeyAction::Help),
            (Char('q'), NONE, KeyAction::Quit),
            (Char('c'), CTRL, KeyAction::Quit),
        ];

        let bindings = table
            .into_iter()
            .map(|(code, modifiers, action)| (KeyEvent::new(code, modifiers), action))
            .collect();
        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    #[test]
    fn default_bindings_map_vim_keys_to_focus() {
        let bindings = KeyBindings::default();
        let j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        let l = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);

        assert_eq!(bindings.get(j), Some(KeyAction::FocusDown));
        assert_eq!(bindings.get(l), Some(KeyAction::FocusRight));
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_copies() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            Some(KeyAction::CopyCard)
        );
    }

    #[test]
    fn lookup_ignores_event_kind_and_state() {
        let bindings = KeyBindings::default();
        let repeat = KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NUM_LOCK,
        };
        assert_eq!(bindings.get(repeat), Some(KeyAction::FocusDown));
    }

    #[test]
    fn bind_replaces_existing_action() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::PageDown);
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(KeyAction::PageDown)
        );
    }

    #[test]
    fn unbound_key_is_none() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE)),
            None
        );
    }
}
