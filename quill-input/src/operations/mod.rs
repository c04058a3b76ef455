//! Builtin commands, organized by functionality.
//!
//! Each submodule provides an extension trait adding the underlying
//! operations to `Editor`, plus the command functions the registry exposes.

mod binding_ops;
mod editing;
mod macro_ops;
mod numeric;

pub use binding_ops::BindingOps;
pub use editing::EditingOps;
pub use macro_ops::MacroOps;

use crate::keymap::command::Command;

/// Every builtin command, ready to register.
#[must_use]
pub fn builtin_commands() -> Vec<Command> {
    vec![
        Command::new(
            "self-insert-command",
            "Insert the character you type.",
            editing::self_insert_command,
        ),
        Command::new("newline", "Insert a newline.", editing::newline),
        Command::new(
            "delete-char",
            "Delete the following character; with a negative argument, the preceding ones.",
            editing::delete_char,
        ),
        Command::new(
            "backward-delete-char",
            "Delete the previous character; with a negative argument, the following ones.",
            editing::backward_delete_char,
        ),
        Command::new(
            "universal-argument",
            "Begin a numeric argument for the following command.",
            numeric::universal_argument,
        ),
        Command::new(
            "keyboard-quit",
            "Cancel the current command and any macro being defined.",
            numeric::keyboard_quit,
        ),
        Command::new(
            "execute-extended-command",
            "Read a command name, then run it.",
            binding_ops::execute_extended_command,
        ),
        Command::new(
            "global-set-key",
            "Bind a key sequence to a command.",
            binding_ops::global_set_key,
        ),
        Command::new(
            "where-is",
            "Show the key sequences that run a command.",
            binding_ops::where_is,
        ),
        Command::new(
            "describe-bindings",
            "Show a list of all defined keys and their commands.",
            binding_ops::describe_bindings,
        ),
        Command::new(
            "list-bindings",
            "Show a list of all defined keys and their commands.",
            binding_ops::describe_bindings,
        ),
        Command::new(
            "start-kbd-macro",
            "Record subsequent keyboard input, defining a keyboard macro.",
            macro_ops::start_kbd_macro,
        ),
        Command::new(
            "end-kbd-macro",
            "Finish defining a keyboard macro.",
            macro_ops::end_kbd_macro,
        ),
        Command::new(
            "call-last-kbd-macro",
            "Call the last keyboard macro defined. A numeric argument is a repeat count.",
            macro_ops::call_last_kbd_macro,
        ),
        Command::new(
            "execute-kbd-macro",
            "Execute a macro written in key notation.",
            macro_ops::execute_kbd_macro,
        ),
    ]
}
