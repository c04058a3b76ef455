//! Command handles and the name → command registry.
//!
//! A [`Command`] is what lives at a trie leaf: a stable name plus the function
//! to run. Handles are `Copy`; neither the trie nor the dispatcher owns the
//! command behind them.

use std::fmt;

use foldhash::HashMap;

use crate::state::Editor;

/// Signature of every command. Returns `false` when the command failed;
/// reporting the failure to the user is the command's own business.
pub type CommandFn = fn(&mut Editor, &CommandArgs) -> bool;

/// A named, invocable command.
#[derive(Clone, Copy)]
pub struct Command {
    name: &'static str,
    doc: &'static str,
    run: CommandFn,
}

impl Command {
    #[must_use]
    pub const fn new(name: &'static str, doc: &'static str, run: CommandFn) -> Self {
        Self { name, doc, run }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn doc(&self) -> &'static str {
        self.doc
    }

    /// Run the command directly, outside of dispatch bookkeeping.
    pub fn call(&self, editor: &mut Editor, args: &CommandArgs) -> bool {
        (self.run)(editor, args)
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Command {}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Command").field(&self.name).finish()
    }
}

/// Arguments handed to a command by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgs {
    /// The numeric argument, 1 unless a prefix supplied another value.
    pub uniarg: i64,
    /// Whether the numeric argument was given explicitly.
    pub explicit: bool,
    /// Positional string arguments for non-interactive calls. Commands that
    /// find one missing prompt for it instead.
    pub params: Vec<String>,
}

impl CommandArgs {
    #[must_use]
    pub fn new(uniarg: i64, explicit: bool) -> Self {
        Self {
            uniarg,
            explicit,
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}

impl Default for CommandArgs {
    fn default() -> Self {
        Self::new(1, false)
    }
}

/// Name → command lookup.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Command>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any previous one with the same name.
    pub fn register(&mut self, command: Command) {
        if self.commands.insert(command.name(), command).is_some() {
            log::debug!("Replaced command '{}'", command.name());
        }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Command> {
        self.commands.get(name).copied()
    }

    #[must_use]
    pub fn name_of(&self, command: &Command) -> &'static str {
        command.name()
    }

    /// All registered names, sorted, for prompt completion.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
