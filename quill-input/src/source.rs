//! The key source: where every keystroke the editor reads comes from.
//!
//! Keys are taken, in order, from
//!
//! 1. the pushback stack, holding keys a reader looked at and returned;
//! 2. the injection stack, holding keys fed in by macro replay;
//! 3. the terminal.
//!
//! Every delivered key is shown to a [`KeyObserver`] (the macro recorder)
//! before the caller sees it, whatever its origin.

use crate::host::{GetKeyMode, Terminal};
use crate::key::KeyEvent;

/// Default capacity of the pushback stack.
pub const KEY_BUFFER_SIZE: usize = 16;

/// Hook told about every key the source hands out or takes back.
pub trait KeyObserver {
    fn key_delivered(&mut self, key: KeyEvent);

    /// `key`, the most recently delivered key, was pushed back unread.
    fn key_returned(&mut self, _key: KeyEvent) {}
}

/// Ignores every key.
impl KeyObserver for () {
    fn key_delivered(&mut self, _key: KeyEvent) {}
}

pub struct KeySource {
    terminal: Box<dyn Terminal>,
    /// Top of stack is the next key out.
    pushback: Vec<KeyEvent>,
    capacity: usize,
    /// Replayed keys, stored reversed so the top of stack is the next key out.
    injected: Vec<KeyEvent>,
    last_key: Option<KeyEvent>,
}

impl KeySource {
    #[must_use]
    pub fn new(terminal: Box<dyn Terminal>, capacity: usize) -> Self {
        Self {
            terminal,
            pushback: Vec::with_capacity(capacity),
            capacity,
            injected: Vec::new(),
            last_key: None,
        }
    }

    /// Next key, or `None` if a delayed read timed out.
    pub fn next_key(
        &mut self,
        mode: GetKeyMode,
        observer: &mut dyn KeyObserver,
    ) -> Option<KeyEvent> {
        let key = self
            .pushback
            .pop()
            .or_else(|| self.injected.pop())
            .or_else(|| self.terminal.get_key(mode))?;
        self.last_key = Some(key);
        observer.key_delivered(key);
        Some(key)
    }

    /// Return a key so the next read delivers it again. No key is a no-op;
    /// a full stack drops the key. Returns whether the key was stored.
    pub fn push_back(&mut self, key: impl Into<Option<KeyEvent>>) -> bool {
        let Some(key) = key.into() else {
            return false;
        };
        if self.pushback.len() >= self.capacity {
            log::warn!("Key buffer full, dropping pushed-back {key}");
            return false;
        }
        self.pushback.push(key);
        true
    }

    /// Queue `keys` ahead of the terminal so they are read in order.
    pub fn inject(&mut self, keys: &[KeyEvent]) {
        self.injected.extend(keys.iter().rev());
    }

    /// The key most recently handed out.
    #[must_use]
    pub fn last_key(&self) -> Option<KeyEvent> {
        self.last_key
    }

    #[must_use]
    pub fn pushback_len(&self) -> usize {
        self.pushback.len()
    }

    #[must_use]
    pub fn injected_len(&self) -> usize {
        self.injected.len()
    }

    /// Keys readable right now without asking the terminal to wait.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pushback.len() + self.injected.len() + self.terminal.pending()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
