//! Interfaces to the parts of the editor the input core drives but does not
//! implement: the terminal, the text buffer, the undo log and the minibuffer.
//!
//! In-memory implementations live in [`crate::memory`].

use std::time::Duration;

use crate::key::KeyEvent;

/// How long a key read may wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GetKeyMode {
    /// Wait until a key arrives.
    #[default]
    Blocking,
    /// Wait at most this long, then report no key.
    Delayed(Duration),
}

/// Source of raw keystrokes.
pub trait Terminal {
    /// Next key from the terminal; `None` when a delayed read timed out.
    fn get_key(&mut self, mode: GetKeyMode) -> Option<KeyEvent>;

    /// Number of keys already buffered and readable without waiting.
    fn pending(&self) -> usize;
}

/// The text being edited, seen only through position-based edits.
pub trait Buffer {
    /// Insert `text` at character position `pos`. Insertion at or before
    /// point moves point along with the text.
    fn insert(&mut self, pos: usize, text: &str);

    /// Delete `len` characters starting at `pos`. Returns `false`, changing
    /// nothing, when the range runs past either end of the buffer.
    fn delete(&mut self, pos: usize, len: usize) -> bool;

    /// The cursor position, as a character index.
    fn point(&self) -> usize;

    /// The whole text.
    fn contents(&self) -> String;
}

/// Undo grouping. Every dispatched command is bracketed by one
/// `begin_sequence`/`end_sequence` pair; pairs nest when commands re-enter
/// dispatch.
pub trait UndoLog {
    fn begin_sequence(&mut self);
    fn end_sequence(&mut self);
}

/// The echo area.
pub trait Minibuffer {
    /// Show a message, replacing the previous one.
    fn write(&mut self, text: &str);

    /// Show an error message and ring the bell.
    fn error(&mut self, text: &str);

    fn clear(&mut self);

    /// Show a temporary help buffer such as `*Help*`.
    fn popup(&mut self, title: &str, body: &str);

    /// Ring the bell without a message.
    fn ding(&mut self) {}
}
