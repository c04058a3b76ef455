//! Binding trie nodes.
//!
//! Each node owns its children outright; the key a node matches is the key
//! it is stored under in its parent. A node is either a bound leaf or a
//! prefix with children, never both.

use foldhash::HashMap;

use super::command::Command;
use crate::key::KeyEvent;

/// A node of the binding trie.
#[derive(Debug, Clone, Default)]
pub struct BindingNode {
    /// Present only while the node is a leaf.
    command: Option<Command>,
    /// Map of key → child node.
    children: HashMap<KeyEvent, BindingNode>,
    /// Insertion order, for listings.
    order: Vec<KeyEvent>,
}

impl BindingNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn command(&self) -> Option<Command> {
        self.command
    }

    #[must_use]
    pub fn get(&self, key: &KeyEvent) -> Option<&BindingNode> {
        self.children.get(key)
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Keys of the children, in the order they were first bound.
    pub fn keys(&self) -> impl Iterator<Item = &KeyEvent> + '_ {
        self.order.iter()
    }

    /// Key of the `index`-th child in binding order.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<KeyEvent> {
        self.order.get(index).copied()
    }

    /// The child under `key`, created if missing. Giving a leaf its first
    /// child turns it into a prefix, so its command is dropped.
    pub(crate) fn child_or_insert(&mut self, key: KeyEvent) -> &mut BindingNode {
        if !self.children.contains_key(&key) {
            if self.children.is_empty() {
                if let Some(previous) = self.command.take() {
                    log::debug!("'{}' lost its binding to become a prefix", previous.name());
                }
            }
            self.order.push(key);
        }
        self.children.entry(key).or_default()
    }

    /// Make this node a leaf bound to `command`. A former prefix loses its
    /// whole subtree.
    pub(crate) fn set_command(&mut self, command: Command) {
        if self.has_children() {
            log::debug!(
                "Binding '{}' over a prefix drops {} nested bindings",
                command.name(),
                self.children.len()
            );
            self.children.clear();
            self.order.clear();
        }
        self.command = Some(command);
    }
}
