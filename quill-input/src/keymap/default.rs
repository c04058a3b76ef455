//! Default key bindings.
//!
//! The table is written in chord notation and bound once at startup, after
//! the printable characters have been given to `self-insert-command`.

use super::command::CommandRegistry;
use super::Keymap;
use crate::error::{Error, Result};
use crate::key::{parse_keys, KeyEvent};

/// `(notation, command name)` pairs bound at startup.
pub const DEFAULT_BINDINGS: &[(&str, &str)] = &[
    // --- Numeric argument and quitting ---
    ("\\C-u", "universal-argument"),
    ("\\C-g", "keyboard-quit"),
    ("\\M-x", "execute-extended-command"),
    // --- Keyboard macros ---
    ("\\C-x(", "start-kbd-macro"),
    ("\\C-x)", "end-kbd-macro"),
    ("\\C-xe", "call-last-kbd-macro"),
    // --- Help ---
    ("\\C-hb", "describe-bindings"),
    ("\\C-hw", "where-is"),
    ("\\F1b", "describe-bindings"),
    ("\\F1w", "where-is"),
    // --- Basic editing ---
    ("\\RET", "newline"),
    ("\\C-d", "delete-char"),
    ("\\DELETE", "delete-char"),
    ("\\BACKSPACE", "backward-delete-char"),
];

/// Name of the command every printable character is bound to.
pub const SELF_INSERT: &str = "self-insert-command";

/// Bind each printable ASCII character to `self-insert-command`.
pub fn bind_printable(keymap: &mut Keymap, registry: &CommandRegistry) -> Result<()> {
    let command = registry
        .lookup(SELF_INSERT)
        .ok_or_else(|| Error::UnknownCommand(SELF_INSERT.to_string()))?;
    for ch in ' '..='~' {
        keymap.bind(&[KeyEvent::char(ch)], command)?;
    }
    Ok(())
}

/// Bind one `(notation, command name)` pair.
pub fn bind_notation(
    keymap: &mut Keymap,
    registry: &CommandRegistry,
    notation: &str,
    name: &str,
) -> Result<()> {
    let keys = parse_keys(notation)?;
    let command = registry
        .lookup(name)
        .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
    keymap.bind(&keys, command)
}

/// Bind the whole [`DEFAULT_BINDINGS`] table.
pub fn bind_defaults(keymap: &mut Keymap, registry: &CommandRegistry) -> Result<()> {
    for (notation, name) in DEFAULT_BINDINGS {
        bind_notation(keymap, registry, notation, name)?;
    }
    Ok(())
}
