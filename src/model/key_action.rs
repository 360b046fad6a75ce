//! Domain-level keyboard actions independent of key bindings.

/// Actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Card focus
    /// Focus the next card in the current column. Default: j/↓
    FocusDown,
    /// Focus the previous card in the current column. Default: k/↑
    FocusUp,
    /// Focus the nearest card in the column to the left. Default: h/←
    FocusLeft,
    /// Focus the nearest card in the column to the right. Default: l/→
    FocusRight,

    // Scrolling
    /// Scroll down by one page. Default: Ctrl+d/Page Down
    PageDown,
    /// Scroll up by one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Back to top. Default: g/Home
    ScrollToTop,
    /// Jump to the end of the longest column. Default: G/End
    ScrollToBottom,

    // Card interaction
    /// Expand or collapse long code blocks on the focused card. Default: Enter/Space
    ToggleExpand,
    /// Run the focused card's copy action (content or link). Default: c/y
    CopyCard,
    /// Add or remove the focused app from the install list. Default: a
    ToggleInstall,
    /// Copy the batch install command. Default: i
    CopyInstallCommand,
    /// Empty the install list. Default: x
    ClearInstallList,

    // Search
    /// Activate search input. Default: / or Ctrl+f
    StartSearch,
    /// Clear the search query. Default: Esc
    CancelSearch,

    // Filters
    /// Select the next tag in the filter bar (All → tag1 → … → All). Default: t
    NextTag,
    /// Select the previous tag. Default: T
    PrevTag,
    /// Cycle the type filter (All → prompt → script → …). Default: f
    NextType,
    /// Clear tag and type filters. Default: 0
    ClearFilters,

    // Application
    /// Cycle theme: system → light → dark. Default: m
    CycleTheme,
    /// Show help overlay. Default: ?
    Help,
    /// Exit. Default: q/Ctrl+c
    Quit,
}
