//! Keyboard macro recording.
//!
//! Keys are recorded in two stages. While a macro is being defined, every
//! delivered key lands in the *pending* buffer of the running command; only
//! when the dispatcher reports that command finished are the pending keys
//! appended to the macro. A command that aborts, or that ends the
//! definition, never reaches the macro.
//!
//! The macro being written and the last finished macro are kept apart, so
//! replaying the last macro while defining a new one can never read from
//! the buffer it is writing to.

use crate::error::{Error, Result};
use crate::key::KeyEvent;
use crate::source::KeyObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
}

#[derive(Debug, Clone, Default)]
pub struct MacroRecorder {
    state: RecorderState,
    /// Keys read by the command currently running.
    pending: Vec<KeyEvent>,
    /// The macro being defined.
    recording: Vec<KeyEvent>,
    /// The last macro whose definition was finished.
    last_macro: Option<Vec<KeyEvent>>,
}

impl MacroRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> RecorderState {
        self.state
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Begin defining a new macro. The last finished macro stays available
    /// until this one is finished.
    pub fn start(&mut self) -> Result<()> {
        if self.is_recording() {
            return Err(Error::AlreadyDefining);
        }
        self.state = RecorderState::Recording;
        self.recording.clear();
        self.pending.clear();
        log::debug!("Keyboard macro definition started");
        Ok(())
    }

    /// Finish the definition; the recorded keys become the last macro. Keys
    /// of the command doing the stopping are dropped.
    pub fn stop(&mut self) -> Result<()> {
        if !self.is_recording() {
            return Err(Error::NotDefining);
        }
        self.state = RecorderState::Idle;
        self.pending.clear();
        let keys = std::mem::take(&mut self.recording);
        log::debug!("Keyboard macro defined with {} keys", keys.len());
        self.last_macro = Some(keys);
        Ok(())
    }

    /// Abandon an unfinished definition. The last finished macro survives.
    pub fn cancel(&mut self) {
        if self.is_recording() {
            log::debug!(
                "Keyboard macro definition cancelled after {} keys",
                self.recording.len()
            );
        }
        self.state = RecorderState::Idle;
        self.pending.clear();
        self.recording.clear();
    }

    /// Move the pending keys of the command that just finished onto the macro.
    pub fn commit(&mut self) {
        if self.is_recording() {
            self.recording.append(&mut self.pending);
        } else {
            self.pending.clear();
        }
    }

    /// Forget the pending keys without recording them.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn pending(&self) -> &[KeyEvent] {
        &self.pending
    }

    /// Keys recorded so far in the definition in progress.
    #[must_use]
    pub fn recorded(&self) -> &[KeyEvent] {
        &self.recording
    }

    #[must_use]
    pub fn last_macro(&self) -> Option<&[KeyEvent]> {
        self.last_macro.as_deref()
    }
}

impl KeyObserver for MacroRecorder {
    fn key_delivered(&mut self, key: KeyEvent) {
        if self.is_recording() {
            self.pending.push(key);
        }
    }

    fn key_returned(&mut self, key: KeyEvent) {
        if self.is_recording() && self.pending.last() == Some(&key) {
            self.pending.pop();
        }
    }
}
