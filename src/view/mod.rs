//! TUI rendering and terminal management (impure shell)

pub mod card;
pub mod clipboard;
pub mod constants;
pub mod filter_bar;
mod help;
pub mod layout;
pub mod search_input;
pub mod status_bar;
pub mod styles;

pub use clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard};
pub use help::render_help_overlay;
pub use search_input::SearchInput;
pub use styles::{ColorConfig, UiPalette};

use crate::config::KeyBindings;
use crate::model::AppError;
use crate::state::mouse_handler::{handle_click, handle_wheel};
use crate::state::{handle_action, ActionOutcome, GalleryState};
use crate::view_state::card::CardRenderer;
use crate::view_state::grid::GridGeometry;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: GalleryState,
    renderer: CardRenderer,
    key_bindings: KeyBindings,
    colors: ColorConfig,
    clipboard: Box<dyn Clipboard>,
    /// Grid drawn in the last frame (for click detection)
    last_grid: Option<GridGeometry>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        state: GalleryState,
        renderer: CardRenderer,
        colors: ColorConfig,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(
            terminal,
            state,
            renderer,
            colors,
            Box::new(Osc52Clipboard),
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Redraws on input, and on the
    /// timer tick only when a copy confirmation expired.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const TICK_INTERVAL: Duration = Duration::from_millis(250);

        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                    }
                    _ => continue,
                }
                self.draw()?;
            } else if self.state.tick(Instant::now()) {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build an app around an existing terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        state: GalleryState,
        renderer: CardRenderer,
        colors: ColorConfig,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        Self {
            terminal,
            state,
            renderer,
            key_bindings: KeyBindings::default(),
            colors,
            clipboard,
            last_grid: None,
        }
    }

    /// Gallery state.
    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    /// Underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        // Special case: Ctrl+C should always quit, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Any unbound key closes the help overlay
        if self.state.help_visible && self.key_bindings.get(key).is_none() {
            self.state.help_visible = false;
            return false;
        }

        // Handle character input when typing a search (before key binding dispatch)
        if self.state.search.is_typing() && !self.state.help_visible {
            match key.code {
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.state.search_input(ch);
                    return false;
                }
                KeyCode::Backspace => {
                    self.state.search_backspace();
                    return false;
                }
                KeyCode::Left => {
                    self.state.search_cursor_left();
                    return false;
                }
                KeyCode::Right => {
                    self.state.search_cursor_right();
                    return false;
                }
                KeyCode::Enter => {
                    self.state.submit_search();
                    return false;
                }
                _ => {} // Fall through to key binding dispatch
            }
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match handle_action(&mut self.state, action, Instant::now()) {
            ActionOutcome::Quit => return true,
            ActionOutcome::Copy(text) => self.copy(&text),
            ActionOutcome::None => {}
        }
        false
    }

    fn copy(&mut self, text: &str) {
        match self.clipboard.copy(text) {
            Ok(()) => debug!(bytes = text.len(), "Copied to clipboard"),
            Err(e) => warn!(error = %e, "Clipboard write failed"),
        }
    }

    /// Handle a mouse event: wheel scrolls, left click focuses a card.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => handle_wheel(&mut self.state, true),
            MouseEventKind::ScrollUp => handle_wheel(&mut self.state, false),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.state.help_visible {
                    self.state.help_visible = false;
                } else if let Some(grid) = self.last_grid {
                    handle_click(&mut self.state, mouse.column, mouse.row, &grid);
                }
            }
            _ => {}
        }
    }

    /// Measure, report heights, then draw one frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);

        layout::sync_layout(&mut self.state, &mut self.renderer, area);
        let areas = layout::calculate_areas(area, &self.state.search);
        self.last_grid = Some(GridGeometry::new(areas.grid, self.state.column_count()));

        let palette = UiPalette::new(self.state.appearance(), self.colors);
        let now = Instant::now();
        let state = &self.state;
        let renderer = &mut self.renderer;
        self.terminal
            .draw(|frame| layout::render_gallery(frame, state, renderer, &palette, now))?;
        Ok(())
    }
}

/// Run the gallery until the user quits.
///
/// The terminal is restored even when setup or the event loop fails.
pub fn run_gallery(
    state: GalleryState,
    renderer: CardRenderer,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    info!(posts = state.posts().len(), "Starting gallery");
    let result = TuiApp::new(state, renderer, colors).and_then(|mut app| app.run());

    // Always restore terminal state
    let restored = restore_terminal();
    result?;
    restored
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
