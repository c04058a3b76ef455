//! Keyboard macro definition and replay.

use crate::error::{Error, Result};
use crate::key::{parse_keys, KeyEvent};
use crate::keymap::command::CommandArgs;
use crate::state::Editor;

/// Extension trait for keyboard macros on `Editor`.
pub trait MacroOps {
    /// Start defining a macro. Keys of every command that completes from
    /// now on are recorded.
    fn start_kbd_macro(&mut self) -> Result<()>;

    /// Finish the definition and make it the last macro.
    fn end_kbd_macro(&mut self) -> Result<()>;

    /// Replay the last macro `uniarg` times.
    fn call_last_kbd_macro(&mut self, uniarg: i64) -> Result<bool>;

    /// Replay a macro written in chord notation `uniarg` times.
    fn execute_kbd_macro(&mut self, notation: &str, uniarg: i64) -> Result<bool>;

    /// Run `keys` through the dispatch loop as if typed. Returns whether
    /// every command they ran succeeded.
    fn replay_keys(&mut self, keys: &[KeyEvent]) -> bool;
}

impl MacroOps for Editor {
    fn start_kbd_macro(&mut self) -> Result<()> {
        self.recorder.start()?;
        self.minibuffer.write("Defining keyboard macro...");
        log::info!("Keyboard macro recording started");
        Ok(())
    }

    fn end_kbd_macro(&mut self) -> Result<()> {
        self.recorder.stop()?;
        log::info!(
            "Keyboard macro recording stopped, {} keys",
            self.recorder.last_macro().map_or(0, <[KeyEvent]>::len)
        );
        Ok(())
    }

    fn call_last_kbd_macro(&mut self, uniarg: i64) -> Result<bool> {
        let keys = self
            .recorder
            .last_macro()
            .ok_or(Error::NoMacroDefined)?
            .to_vec();
        // The invoking keys are not part of what gets recorded; the replayed
        // keys are, as each replayed command completes.
        self.recorder.discard_pending();
        Ok(self.execute_with_uniarg(uniarg, |editor| editor.replay_keys(&keys)))
    }

    fn execute_kbd_macro(&mut self, notation: &str, uniarg: i64) -> Result<bool> {
        let keys = parse_keys(notation)?;
        self.recorder.discard_pending();
        Ok(self.execute_with_uniarg(uniarg, |editor| editor.replay_keys(&keys)))
    }

    fn replay_keys(&mut self, keys: &[KeyEvent]) -> bool {
        let injected_mark = self.keys.injected_len();
        let pushback_mark = self.keys.pushback_len();
        log::debug!("Replaying {} keys", keys.len());

        self.keys.inject(keys);
        let mut ok = true;
        while self.keys.injected_len() > injected_mark || self.keys.pushback_len() > pushback_mark
        {
            ok &= self.get_and_run_command();
        }
        ok
    }
}

pub(crate) fn start_kbd_macro(editor: &mut Editor, _args: &CommandArgs) -> bool {
    let result = editor.start_kbd_macro();
    report_result(editor, result)
}

pub(crate) fn end_kbd_macro(editor: &mut Editor, _args: &CommandArgs) -> bool {
    let result = editor.end_kbd_macro();
    report_result(editor, result)
}

pub(crate) fn call_last_kbd_macro(editor: &mut Editor, args: &CommandArgs) -> bool {
    match editor.call_last_kbd_macro(args.uniarg) {
        Ok(ok) => ok,
        Err(err) => {
            editor.report(&err);
            false
        }
    }
}

pub(crate) fn execute_kbd_macro(editor: &mut Editor, args: &CommandArgs) -> bool {
    let notation = match args.param(0) {
        Some(notation) => notation.to_string(),
        None => match editor.read_line("Execute keyboard macro: ", &[]) {
            Some(notation) => notation,
            None => return false,
        },
    };
    match editor.execute_kbd_macro(&notation, args.uniarg) {
        Ok(ok) => ok,
        Err(err) => {
            editor.report(&err);
            false
        }
    }
}

fn report_result(editor: &mut Editor, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            editor.report(&err);
            false
        }
    }
}
