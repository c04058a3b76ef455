//! Quill Input - key dispatch for the Quill terminal editor
//!
//! This crate turns raw keystrokes into editor commands. It owns the parts of
//! an Emacs-style editor that sit between the terminal and the commands:
//!
//! - a key source with pushback and macro injection
//! - a trie of multi-key bindings with prefix feedback
//! - keyboard macro recording and replay
//! - numeric (universal) arguments
//! - a dispatcher that brackets every command in an undo sequence
//!
//! ## Quick Start
//!
//! ```no_run
//! use quill_input::memory::{MessageLine, RopeBuffer, ScriptedTerminal, UndoJournal};
//! use quill_input::{Collaborators, Editor, QuillConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = QuillConfig::load_default()?;
//!     let terminal = ScriptedTerminal::from_notation("\\C-x(hello\\C-x)\\C-xe")?;
//!     let collaborators = Collaborators::new(
//!         terminal,
//!         RopeBuffer::new(),
//!         UndoJournal::new(),
//!         MessageLine::new(),
//!     );
//!     let mut editor = Editor::new(collaborators, &config)?;
//!     editor.run_until_idle();
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Everything runs on one thread. Commands receive `&mut Editor` and may
//! read further keys or dispatch other commands; the dispatcher saves and
//! restores its per-invocation state around each nested call. The editor
//! talks to the outside world only through the traits in [`host`].

// Public library modules
pub mod config;
pub mod error;
pub mod host;
pub mod key;
pub mod keymap;
pub mod memory;
pub mod operations;
pub mod recorder;
pub mod source;
pub mod state;

// Internal modules
mod prompt;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod test_helpers;

// Convenience re-exports
pub use config::QuillConfig;
pub use error::{Error, Result};
pub use key::{describe_keys, parse_keys, to_notation, KeyCode, KeyEvent, KeyModifiers};
pub use keymap::command::{Command, CommandArgs, CommandRegistry};
pub use keymap::{Keymap, Lookup};
pub use state::{Collaborators, DispatchFlags, Editor};
