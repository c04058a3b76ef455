//! The global key binding table.
//!
//! Key sequences are paths through a trie of [`BindingNode`]s with
//! [`Command`]s at the leaves. The table supports:
//!
//! - Multi-key sequences (e.g., `C-x C-f`)
//! - Partial-match lookup, so readers know when more keys are needed
//! - Rebinding at runtime (`global-set-key`)
//! - Depth-first listing of every binding (`describe-bindings`, `where-is`)
//!
//! Meta-digit chords bypass the trie entirely and always start a numeric
//! argument.

pub mod command;
pub mod default;
pub mod trie;

use command::Command;
use trie::BindingNode;

use crate::error::{Error, Result};
use crate::key::KeyEvent;

/// Result of looking up a key sequence.
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'a> {
    /// Some key along the way has no binding.
    NoMatch,
    /// The sequence is a prefix of longer bindings; more keys needed.
    Prefix(&'a BindingNode),
    /// The sequence is bound to a command.
    Bound(Command),
}

/// The binding trie plus the numeric-argument command that Meta-digits
/// resolve to.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    root: BindingNode,
    numeric_prefix: Option<Command>,
}

impl Keymap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the command every single Meta-digit chord resolves to.
    pub fn set_numeric_prefix(&mut self, command: Command) {
        self.numeric_prefix = Some(command);
    }

    /// Bind `keys` to `command`, overwriting an existing binding.
    ///
    /// Nodes along the path that were leaves become prefixes and lose their
    /// command; a final node that was a prefix becomes a leaf and loses its
    /// subtree.
    pub fn bind(&mut self, keys: &[KeyEvent], command: Command) -> Result<()> {
        let Some((last, prefix)) = keys.split_last() else {
            return Err(Error::EmptyKeySequence);
        };

        let mut node = &mut self.root;
        for key in prefix {
            node = node.child_or_insert(*key);
        }
        node.child_or_insert(*last).set_command(command);
        Ok(())
    }

    /// Walk the trie as far as `keys` allows.
    #[must_use]
    pub fn lookup(&self, keys: &[KeyEvent]) -> Lookup<'_> {
        let mut node = &self.root;
        for key in keys {
            match node.get(key) {
                Some(child) => node = child,
                None => return Lookup::NoMatch,
            }
        }
        match node.command() {
            Some(command) => Lookup::Bound(command),
            None => Lookup::Prefix(node),
        }
    }

    /// The command a complete key sequence runs, if any.
    #[must_use]
    pub fn command_for(&self, keys: &[KeyEvent]) -> Option<Command> {
        if let [key] = keys {
            if key.is_meta_digit() {
                if let Some(command) = self.numeric_prefix {
                    return Some(command);
                }
            }
        }
        match self.lookup(keys) {
            Lookup::Bound(command) => Some(command),
            Lookup::NoMatch | Lookup::Prefix(_) => None,
        }
    }

    /// Every binding, depth first, in binding order.
    #[must_use]
    pub fn iter(&self) -> Bindings<'_> {
        Bindings {
            stack: vec![Frame {
                node: &self.root,
                next: 0,
            }],
            path: Vec::new(),
        }
    }

    /// Every key sequence bound to the command named `name`.
    #[must_use]
    pub fn keys_for(&self, name: &str) -> Vec<Vec<KeyEvent>> {
        self.iter()
            .filter(|(_, command)| command.name() == name)
            .map(|(keys, _)| keys)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Keymap {
    type Item = (Vec<KeyEvent>, Command);
    type IntoIter = Bindings<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

struct Frame<'a> {
    node: &'a BindingNode,
    next: usize,
}

/// Depth-first iterator over `(keys, command)` pairs of a [`Keymap`].
pub struct Bindings<'a> {
    stack: Vec<Frame<'a>>,
    path: Vec<KeyEvent>,
}

impl Iterator for Bindings<'_> {
    type Item = (Vec<KeyEvent>, Command);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let node = frame.node;
            let Some(key) = node.key_at(frame.next) else {
                self.stack.pop();
                self.path.pop();
                continue;
            };
            frame.next += 1;

            let Some(child) = node.get(&key) else {
                continue;
            };
            if let Some(command) = child.command() {
                let mut keys = self.path.clone();
                keys.push(key);
                return Some((keys, command));
            }
            if child.has_children() {
                self.path.push(key);
                self.stack.push(Frame {
                    node: child,
                    next: 0,
                });
            }
        }
    }
}
