//! Binding commands: rebinding keys, asking where a command is bound, and
//! listing the whole table.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::key::{describe_keys, parse_keys, KeyEvent};
use crate::keymap::command::CommandArgs;
use crate::state::Editor;

/// Extension trait for inspecting and changing the binding table.
pub trait BindingOps {
    /// Bind `keys` to the command registered as `name`.
    fn bind_key(&mut self, keys: &[KeyEvent], name: &str) -> Result<()>;

    /// The `where-is` answer for `name`.
    fn where_is_message(&self, name: &str) -> Result<String>;

    /// Every binding as a two-column table.
    fn bindings_listing(&self) -> String;
}

impl BindingOps for Editor {
    fn bind_key(&mut self, keys: &[KeyEvent], name: &str) -> Result<()> {
        let command = self
            .registry
            .lookup(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
        self.keymap.bind(keys, command)?;
        log::info!("Bound {} to {name}", describe_keys(keys));
        Ok(())
    }

    fn where_is_message(&self, name: &str) -> Result<String> {
        if self.registry.lookup(name).is_none() {
            return Err(Error::UnknownCommand(name.to_string()));
        }
        let bound: Vec<String> = self
            .keymap
            .keys_for(name)
            .iter()
            .map(|keys| describe_keys(keys))
            .collect();
        if bound.is_empty() {
            Ok(format!("{name} is not on any key"))
        } else {
            Ok(format!("{name} is on {}", bound.join(", ")))
        }
    }

    fn bindings_listing(&self) -> String {
        let mut out = String::from("Key translations:\n");
        let _ = writeln!(out, "{:<15} {}", "key", "binding");
        let _ = writeln!(out, "{:<15} {}", "---", "-------");
        for (keys, command) in &self.keymap {
            let _ = writeln!(out, "{:<15} {}", describe_keys(&keys), command.name());
        }
        out
    }
}

pub(crate) fn global_set_key(editor: &mut Editor, args: &CommandArgs) -> bool {
    let keys = match args.param(0) {
        Some(notation) => match parse_keys(notation) {
            Ok(keys) => keys,
            Err(err) => {
                editor.report(&err);
                return false;
            }
        },
        None => {
            editor.minibuffer.write("Set key globally: ");
            editor.get_key_sequence()
        }
    };

    let name = match args.param(1) {
        Some(name) => name.to_string(),
        None => {
            let prompt = format!("Set key {} to command: ", describe_keys(&keys));
            match editor.read_command_name(&prompt) {
                Some(name) => name,
                None => return false,
            }
        }
    };

    match editor.bind_key(&keys, &name) {
        Ok(()) => true,
        Err(err) => {
            editor.report(&err);
            false
        }
    }
}

pub(crate) fn where_is(editor: &mut Editor, args: &CommandArgs) -> bool {
    let name = match args.param(0) {
        Some(name) => name.to_string(),
        None => match editor.read_command_name("Where is command: ") {
            Some(name) => name,
            None => return false,
        },
    };
    match editor.where_is_message(&name) {
        Ok(message) => {
            editor.minibuffer.write(&message);
            true
        }
        Err(err) => {
            editor.report(&err);
            false
        }
    }
}

pub(crate) fn describe_bindings(editor: &mut Editor, _args: &CommandArgs) -> bool {
    let listing = editor.bindings_listing();
    editor.minibuffer.popup("*Help*", &listing);
    true
}

/// Read a command name and run it with the current numeric argument.
pub(crate) fn execute_extended_command(editor: &mut Editor, args: &CommandArgs) -> bool {
    let name = match args.param(0) {
        Some(name) => name.to_string(),
        None => {
            let prompt = if args.explicit {
                format!("{} M-x ", args.uniarg)
            } else {
                "M-x ".to_string()
            };
            match editor.read_command_name(&prompt) {
                Some(name) => name,
                None => return false,
            }
        }
    };
    let Some(command) = editor.registry.lookup(&name) else {
        editor.report(&Error::UnknownCommand(name));
        return false;
    };

    let inner = CommandArgs::new(args.uniarg, args.explicit)
        .with_params(args.params.iter().skip(1).cloned());
    let ok = editor.dispatch_with(command, &inner);

    // A numeric argument set by the named command belongs to the next one.
    let set = editor.last_flags();
    if set.set_uniarg {
        let flags = editor.this_flags_mut();
        flags.set_uniarg = true;
        flags.uniarg = set.uniarg;
        flags.uniarg_empty = set.uniarg_empty;
    }
    ok
}
