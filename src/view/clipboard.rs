//! Clipboard writes.
//!
//! The terminal owns the clipboard: text is sent as an OSC 52 escape, which
//! works over SSH and needs no platform clipboard library.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crossterm::{style::Print, ExecutableCommand};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Destination for copied text.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn copy(&mut self, text: &str) -> io::Result<()>;
}

/// OSC 52 sequence that sets the system clipboard (`c`) to `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Writes to the system clipboard through the terminal (OSC 52).
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    /// Emit the sequence for `text` on `out`.
    pub fn write_to<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
        out.execute(Print(osc52_sequence(text)))?;
        Ok(())
    }
}

impl Clipboard for Osc52Clipboard {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        Self::write_to(&mut io::stdout(), text)
    }
}

/// Keeps copied text in memory. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    history: Rc<RefCell<Vec<String>>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything copied so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    /// Most recently copied text.
    pub fn last(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        self.history.borrow_mut().push(text.to_string());
        Ok(())
    }
}
