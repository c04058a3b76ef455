//! The editor: key source, macro recorder, binding table and command
//! registry wired to the host collaborators.
//!
//! This module provides:
//! - `Editor`: owner of all input state, handed to every command
//! - `Collaborators`: the boxed host objects an `Editor` drives
//! - `DispatchFlags`: per-invocation state threaded through dispatch

mod dispatch;
mod reader;

pub use dispatch::DispatchFlags;

use std::time::Duration;

use crate::config::QuillConfig;
use crate::error::{Error, Result};
use crate::host::{Buffer, GetKeyMode, Minibuffer, Terminal, UndoLog};
use crate::key::KeyEvent;
use crate::keymap::command::{Command, CommandRegistry};
use crate::keymap::default::{bind_defaults, bind_notation, bind_printable};
use crate::keymap::Keymap;
use crate::operations::builtin_commands;
use crate::recorder::MacroRecorder;
use crate::source::{KeyObserver, KeySource};

/// Name of the command Meta-digit chords resolve to.
const UNIVERSAL_ARGUMENT: &str = "universal-argument";

/// The host objects an [`Editor`] reads from and writes to.
pub struct Collaborators {
    pub terminal: Box<dyn Terminal>,
    pub buffer: Box<dyn Buffer>,
    pub undo: Box<dyn UndoLog>,
    pub minibuffer: Box<dyn Minibuffer>,
}

impl Collaborators {
    pub fn new(
        terminal: impl Terminal + 'static,
        buffer: impl Buffer + 'static,
        undo: impl UndoLog + 'static,
        minibuffer: impl Minibuffer + 'static,
    ) -> Self {
        Self {
            terminal: Box::new(terminal),
            buffer: Box::new(buffer),
            undo: Box::new(undo),
            minibuffer: Box::new(minibuffer),
        }
    }
}

/// All input state of one editor session.
pub struct Editor {
    pub(crate) keys: KeySource,
    pub(crate) recorder: MacroRecorder,
    pub(crate) keymap: Keymap,
    pub(crate) registry: CommandRegistry,
    pub(crate) buffer: Box<dyn Buffer>,
    pub(crate) undo: Box<dyn UndoLog>,
    pub(crate) minibuffer: Box<dyn Minibuffer>,

    // Dispatch bookkeeping
    pub(crate) last_command: Option<Command>,
    pub(crate) this_command: Option<Command>,
    /// Flags published by the previous top-level dispatch.
    pub(crate) last_flags: DispatchFlags,
    /// Flags of the dispatch in progress.
    pub(crate) this_flags: DispatchFlags,
}

impl Editor {
    /// Build an editor with the builtin commands and the default bindings,
    /// then apply the `[keys]` overrides from `config`.
    pub fn new(collaborators: Collaborators, config: &QuillConfig) -> Result<Self> {
        let Collaborators {
            terminal,
            buffer,
            undo,
            minibuffer,
        } = collaborators;

        let mut registry = CommandRegistry::new();
        for command in builtin_commands() {
            registry.register(command);
        }

        let mut keymap = Keymap::new();
        let numeric = registry
            .lookup(UNIVERSAL_ARGUMENT)
            .ok_or_else(|| Error::UnknownCommand(UNIVERSAL_ARGUMENT.to_string()))?;
        keymap.set_numeric_prefix(numeric);
        if config.input.self_insert_printable {
            bind_printable(&mut keymap, &registry)?;
        }
        bind_defaults(&mut keymap, &registry)?;
        for (notation, name) in &config.keys {
            bind_notation(&mut keymap, &registry, notation, name)?;
            log::debug!("Configured binding {notation} -> {name}");
        }

        log::info!(
            "Editor ready: {} commands, {} bindings",
            registry.len(),
            keymap.iter().count()
        );

        Ok(Self {
            keys: KeySource::new(terminal, config.input.key_buffer_size),
            recorder: MacroRecorder::new(),
            keymap,
            registry,
            buffer,
            undo,
            minibuffer,
            last_command: None,
            this_command: None,
            last_flags: DispatchFlags::default(),
            this_flags: DispatchFlags::default(),
        })
    }

    #[must_use]
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Add commands beyond the builtins.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn recorder(&self) -> &MacroRecorder {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut MacroRecorder {
        &mut self.recorder
    }

    #[must_use]
    pub fn buffer(&self) -> &dyn Buffer {
        self.buffer.as_ref()
    }

    pub fn buffer_mut(&mut self) -> &mut dyn Buffer {
        self.buffer.as_mut()
    }

    pub fn minibuffer_mut(&mut self) -> &mut dyn Minibuffer {
        self.minibuffer.as_mut()
    }

    /// The command that finished most recently.
    #[must_use]
    pub fn last_command(&self) -> Option<Command> {
        self.last_command
    }

    /// The command being dispatched right now.
    #[must_use]
    pub fn this_command(&self) -> Option<Command> {
        self.this_command
    }

    #[must_use]
    pub fn last_flags(&self) -> DispatchFlags {
        self.last_flags
    }

    #[must_use]
    pub fn this_flags(&self) -> DispatchFlags {
        self.this_flags
    }

    pub fn this_flags_mut(&mut self) -> &mut DispatchFlags {
        &mut self.this_flags
    }

    /// The key most recently read, e.g. the one that invoked the running
    /// command.
    #[must_use]
    pub fn last_key(&self) -> Option<KeyEvent> {
        self.keys.last_key()
    }

    /// Keys readable without waiting.
    #[must_use]
    pub fn pending_keys(&self) -> usize {
        self.keys.pending()
    }

    /// Read one key, waiting as long as it takes.
    pub fn get_key(&mut self) -> KeyEvent {
        loop {
            if let Some(key) = self.get_key_with(GetKeyMode::Blocking) {
                return key;
            }
        }
    }

    /// Read one key; `None` when a delayed read timed out.
    pub fn get_key_with(&mut self, mode: GetKeyMode) -> Option<KeyEvent> {
        self.keys.next_key(mode, &mut self.recorder)
    }

    /// Give a key back so the next read returns it.
    pub fn unget_key(&mut self, key: KeyEvent) {
        self.recorder.key_returned(key);
        self.keys.push_back(key);
    }

    /// Wait at most `timeout` for a key and leave it unread.
    pub fn wait_key(&mut self, timeout: Duration) -> Option<KeyEvent> {
        let key = self.get_key_with(GetKeyMode::Delayed(timeout))?;
        self.unget_key(key);
        Some(key)
    }

    /// Queue keys ahead of the terminal.
    pub fn inject_keys(&mut self, keys: &[KeyEvent]) {
        self.keys.inject(keys);
    }

    /// Show `err` as an error in the minibuffer.
    pub fn report(&mut self, err: &Error) {
        log::debug!("Command error: {err}");
        self.minibuffer.error(&err.to_string());
    }

    /// Abort: drop any unfinished macro definition and say so.
    pub fn keyboard_quit(&mut self) {
        self.recorder.cancel();
        self.minibuffer.error("Quit");
    }
}
