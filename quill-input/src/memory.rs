//! In-memory collaborators.
//!
//! Each type is a cheap handle around shared state: hand one clone to the
//! [`Editor`](crate::state::Editor) and keep another to feed keys or inspect
//! what the editor did.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ropey::Rope;

use crate::error::Result;
use crate::host::{Buffer, GetKeyMode, Minibuffer, Terminal, UndoLog};
use crate::key::{parse_keys, KeyEvent};

/// A terminal that plays back a queue of keys.
///
/// Once the queue runs dry a blocking read delivers `C-g`, so a prompt or
/// an unfinished prefix aborts instead of waiting forever; a delayed read
/// times out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTerminal {
    queue: Rc<RefCell<VecDeque<KeyEvent>>>,
}

impl ScriptedTerminal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal preloaded with keys written in chord notation.
    pub fn from_notation(notation: &str) -> Result<Self> {
        let terminal = Self::new();
        terminal.feed(&parse_keys(notation)?);
        Ok(terminal)
    }

    /// Append keys to the end of the queue.
    pub fn feed(&self, keys: &[KeyEvent]) {
        self.queue.borrow_mut().extend(keys.iter().copied());
    }

    /// Append keys written in chord notation.
    pub fn feed_notation(&self, notation: &str) -> Result<()> {
        self.feed(&parse_keys(notation)?);
        Ok(())
    }
}

impl Terminal for ScriptedTerminal {
    fn get_key(&mut self, mode: GetKeyMode) -> Option<KeyEvent> {
        if let Some(key) = self.queue.borrow_mut().pop_front() {
            return Some(key);
        }
        match mode {
            GetKeyMode::Blocking => {
                log::trace!("Scripted input exhausted, delivering C-g");
                Some(KeyEvent::ctrl('g'))
            }
            GetKeyMode::Delayed(_) => None,
        }
    }

    fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

#[derive(Debug, Default)]
struct RopeState {
    text: Rope,
    point: usize,
}

/// A text buffer on a [`Rope`], with a cursor.
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    state: Rc<RefCell<RopeState>>,
}

impl RopeBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text` with point at its end.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let text = Rope::from_str(text);
        let point = text.len_chars();
        Self {
            state: Rc::new(RefCell::new(RopeState { text, point })),
        }
    }

    /// Move point, clamped to the buffer.
    pub fn set_point(&self, point: usize) {
        let mut state = self.state.borrow_mut();
        state.point = point.min(state.text.len_chars());
    }
}

impl Buffer for RopeBuffer {
    fn insert(&mut self, pos: usize, text: &str) {
        let mut state = self.state.borrow_mut();
        let pos = pos.min(state.text.len_chars());
        state.text.insert(pos, text);
        if pos <= state.point {
            state.point += text.chars().count();
        }
    }

    fn delete(&mut self, pos: usize, len: usize) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(end) = pos.checked_add(len) else {
            return false;
        };
        if end > state.text.len_chars() {
            return false;
        }
        state.text.remove(pos..end);
        if state.point > pos {
            state.point -= len.min(state.point - pos);
        }
        true
    }

    fn point(&self) -> usize {
        self.state.borrow().point
    }

    fn contents(&self) -> String {
        self.state.borrow().text.to_string()
    }
}

/// One entry in an [`UndoJournal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoMark {
    Begin,
    End,
}

#[derive(Debug, Default)]
struct Journal {
    marks: Vec<UndoMark>,
    depth: usize,
    max_depth: usize,
}

/// An undo log that only remembers the grouping marks it was given.
#[derive(Debug, Clone, Default)]
pub struct UndoJournal {
    journal: Rc<RefCell<Journal>>,
}

impl UndoJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn marks(&self) -> Vec<UndoMark> {
        self.journal.borrow().marks.clone()
    }

    /// Sequences currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.journal.borrow().depth
    }

    /// Deepest nesting seen so far.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.journal.borrow().max_depth
    }

    #[must_use]
    pub fn begin_count(&self) -> usize {
        self.count(UndoMark::Begin)
    }

    #[must_use]
    pub fn end_count(&self) -> usize {
        self.count(UndoMark::End)
    }

    fn count(&self, mark: UndoMark) -> usize {
        self.journal
            .borrow()
            .marks
            .iter()
            .filter(|m| **m == mark)
            .count()
    }
}

impl UndoLog for UndoJournal {
    fn begin_sequence(&mut self) {
        let mut journal = self.journal.borrow_mut();
        journal.marks.push(UndoMark::Begin);
        journal.depth += 1;
        journal.max_depth = journal.max_depth.max(journal.depth);
    }

    fn end_sequence(&mut self) {
        let mut journal = self.journal.borrow_mut();
        journal.marks.push(UndoMark::End);
        if journal.depth == 0 {
            log::warn!("Undo sequence ended without a matching begin");
        }
        journal.depth = journal.depth.saturating_sub(1);
    }
}

#[derive(Debug, Default)]
struct Messages {
    current: Option<String>,
    writes: Vec<String>,
    errors: Vec<String>,
    popups: Vec<(String, String)>,
    bells: usize,
}

/// A minibuffer that keeps everything it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct MessageLine {
    messages: Rc<RefCell<Messages>>,
}

impl MessageLine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The text showing right now, if any.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.messages.borrow().current.clone()
    }

    /// Every message written, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.messages.borrow().writes.clone()
    }

    /// Every error reported, in order.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.messages.borrow().errors.clone()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.messages.borrow().errors.last().cloned()
    }

    /// `(title, body)` of every popup shown.
    #[must_use]
    pub fn popups(&self) -> Vec<(String, String)> {
        self.messages.borrow().popups.clone()
    }

    #[must_use]
    pub fn bell_count(&self) -> usize {
        self.messages.borrow().bells
    }
}

impl Minibuffer for MessageLine {
    fn write(&mut self, text: &str) {
        let mut messages = self.messages.borrow_mut();
        messages.current = Some(text.to_string());
        messages.writes.push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        log::debug!("Minibuffer error: {text}");
        let mut messages = self.messages.borrow_mut();
        messages.current = Some(text.to_string());
        messages.errors.push(text.to_string());
        messages.bells += 1;
    }

    fn clear(&mut self) {
        self.messages.borrow_mut().current = None;
    }

    fn popup(&mut self, title: &str, body: &str) {
        self.messages
            .borrow_mut()
            .popups
            .push((title.to_string(), body.to_string()));
    }

    fn ding(&mut self) {
        self.messages.borrow_mut().bells += 1;
    }
}
