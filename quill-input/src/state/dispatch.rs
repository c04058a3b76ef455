//! Command dispatch.

use std::mem;

use super::Editor;
use crate::error::Error;
use crate::key::describe_keys;
use crate::keymap::command::{Command, CommandArgs};

/// State of one command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchFlags {
    /// A macro was being defined when the invocation started, or, once
    /// published as the previous flags, when it finished.
    pub defining_macro: bool,
    /// The command set a numeric argument for the next command.
    pub set_uniarg: bool,
    /// The numeric argument was given with `C-u` but no digits.
    pub uniarg_empty: bool,
    pub uniarg: i64,
}

impl Default for DispatchFlags {
    fn default() -> Self {
        Self {
            defining_macro: false,
            set_uniarg: false,
            uniarg_empty: false,
            uniarg: 1,
        }
    }
}

impl DispatchFlags {
    /// Flags for a new invocation following one that finished with `prev`.
    /// The numeric argument survives only if `prev` set it.
    #[must_use]
    pub fn entering(prev: Self, defining_macro: bool) -> Self {
        if prev.set_uniarg {
            Self {
                defining_macro,
                set_uniarg: false,
                uniarg_empty: prev.uniarg_empty,
                uniarg: prev.uniarg,
            }
        } else {
            Self {
                defining_macro,
                ..Self::default()
            }
        }
    }

    /// The numeric argument these flags hand to the next command.
    #[must_use]
    pub fn pending_uniarg(&self) -> (i64, bool) {
        if self.set_uniarg {
            (self.uniarg, true)
        } else {
            (1, false)
        }
    }
}

impl Editor {
    /// Run `command` with a numeric argument.
    pub fn dispatch(&mut self, command: Command, uniarg: i64, explicit: bool) -> bool {
        self.dispatch_with(command, &CommandArgs::new(uniarg, explicit))
    }

    /// Run `command` inside an undo sequence, recording its keys into the
    /// macro being defined.
    ///
    /// Keys are recorded only if a definition was in progress both before
    /// and after the call, which leaves out the keys of the commands that
    /// start and end a definition. Keys of a command that set a numeric
    /// argument stay pending and are recorded with the next command.
    pub fn dispatch_with(&mut self, command: Command, args: &CommandArgs) -> bool {
        self.undo.begin_sequence();

        let entering = DispatchFlags::entering(self.last_flags, self.recorder.is_recording());
        let outer_flags = mem::replace(&mut self.this_flags, entering);
        // The argument belongs to this command, not to anything it dispatches.
        self.last_flags = DispatchFlags {
            defining_macro: entering.defining_macro,
            ..DispatchFlags::default()
        };
        let outer_command = self.this_command.replace(command);

        log::trace!("Dispatching {} (arg {})", command.name(), args.uniarg);
        let ok = command.call(self, args);

        self.last_command = self.this_command;
        self.this_command = outer_command;
        let flags = mem::replace(&mut self.this_flags, outer_flags);

        if flags.defining_macro && self.recorder.is_recording() && !flags.set_uniarg {
            self.recorder.commit();
        }

        self.undo.end_sequence();
        self.last_flags = DispatchFlags {
            defining_macro: self.recorder.is_recording(),
            ..flags
        };
        ok
    }

    /// Read one key sequence and run the command bound to it.
    pub fn get_and_run_command(&mut self) -> bool {
        let keys = self.get_key_sequence();
        let command = self.keymap.command_for(&keys);
        self.minibuffer.clear();

        if let Some(command) = command {
            let (uniarg, explicit) = self.last_flags.pending_uniarg();
            return self.dispatch(command, uniarg, explicit);
        }

        self.recorder.discard_pending();
        self.last_flags = DispatchFlags {
            defining_macro: self.recorder.is_recording(),
            ..DispatchFlags::default()
        };
        self.report(&Error::UnboundSequence(describe_keys(&keys)));
        false
    }

    /// Run commands while keys are readable without waiting. Returns the
    /// number of key sequences processed.
    pub fn run_until_idle(&mut self) -> usize {
        let mut count = 0;
        while self.keys.pending() > 0 {
            self.get_and_run_command();
            count += 1;
        }
        count
    }

    /// Run `step` `uniarg` times, stopping at the first failure. A count of
    /// zero or less runs nothing and succeeds.
    pub fn execute_with_uniarg(
        &mut self,
        uniarg: i64,
        mut step: impl FnMut(&mut Editor) -> bool,
    ) -> bool {
        let mut ok = true;
        let mut n = 0;
        while ok && n < uniarg {
            ok = step(self);
            n += 1;
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyEvent;
    use crate::memory::UndoMark;
    use crate::test_helpers::{self, TestEditor};

    fn fail(_: &mut Editor, _: &CommandArgs) -> bool {
        false
    }

    fn nested(editor: &mut Editor, _: &CommandArgs) -> bool {
        let inner = editor
            .registry()
            .lookup("fail")
            .expect("fail is registered");
        editor.dispatch(inner, 1, false);
        true
    }

    fn set_arg(editor: &mut Editor, args: &CommandArgs) -> bool {
        let flags = editor.this_flags_mut();
        flags.set_uniarg = true;
        flags.uniarg = args.uniarg * 10;
        true
    }

    fn sees_definition(editor: &mut Editor, _: &CommandArgs) -> bool {
        editor.this_flags().defining_macro
    }

    const FAIL: Command = Command::new("fail", "", fail);
    const SEES_DEFINITION: Command = Command::new("sees-definition", "", sees_definition);
    const NESTED: Command = Command::new("nested", "", nested);
    const SET_ARG: Command = Command::new("set-arg", "", set_arg);

    fn editor() -> TestEditor {
        let mut t = test_helpers::editor("");
        for command in [FAIL, NESTED, SET_ARG] {
            t.editor.registry_mut().register(command);
        }
        t
    }

    #[test]
    fn failed_command_is_still_bracketed_and_remembered() {
        let mut t = editor();
        assert!(!t.editor.dispatch(FAIL, 1, false));
        assert_eq!(t.undo.marks(), vec![UndoMark::Begin, UndoMark::End]);
        assert_eq!(t.editor.last_command(), Some(FAIL));
        assert_eq!(t.editor.this_command(), None);
    }

    #[test]
    fn nested_dispatch_nests_undo_sequences() {
        let mut t = editor();
        assert!(t.editor.dispatch(NESTED, 1, false));
        assert_eq!(
            t.undo.marks(),
            vec![UndoMark::Begin, UndoMark::Begin, UndoMark::End, UndoMark::End]
        );
        assert_eq!(t.undo.max_depth(), 2);
        assert_eq!(t.undo.depth(), 0);
        assert_eq!(t.editor.last_command(), Some(NESTED));
    }

    #[test]
    fn numeric_argument_carries_over_one_command_only() {
        let mut t = editor();
        t.editor.dispatch(SET_ARG, 4, true);
        assert_eq!(t.editor.last_flags().pending_uniarg(), (40, true));
        assert_eq!(t.editor.this_flags(), DispatchFlags::default());

        t.editor.dispatch(FAIL, 40, true);
        assert_eq!(t.editor.last_flags().pending_uniarg(), (1, false));
    }

    #[test]
    fn entering_flags_reset_argument_unless_previous_set_one() {
        let prev = DispatchFlags {
            set_uniarg: true,
            uniarg: 7,
            ..DispatchFlags::default()
        };
        assert_eq!(DispatchFlags::entering(prev, false).uniarg, 7);
        assert!(!DispatchFlags::entering(prev, false).set_uniarg);

        let prev = DispatchFlags {
            uniarg: 7,
            ..DispatchFlags::default()
        };
        assert_eq!(DispatchFlags::entering(prev, true).uniarg, 1);
        assert!(DispatchFlags::entering(prev, true).defining_macro);
    }

    #[test]
    fn nested_dispatch_does_not_inherit_argument() {
        let mut t = editor();
        t.editor.dispatch(SET_ARG, 4, true);
        // `nested` runs `fail` inside itself; only `nested` sees the argument.
        t.editor.dispatch(NESTED, 40, true);
        assert_eq!(t.editor.last_flags().pending_uniarg(), (1, false));
        assert_eq!(t.editor.last_command(), Some(NESTED));
    }

    #[test]
    fn defining_snapshot_is_taken_on_entry() {
        let mut t = editor();
        assert!(!t.editor.dispatch(SEES_DEFINITION, 1, false));
        assert!(!t.editor.last_flags().defining_macro);

        t.editor.recorder_mut().start().expect("start");
        assert!(t.editor.dispatch(SEES_DEFINITION, 1, false));
        assert!(t.editor.last_flags().defining_macro);
    }

    #[test]
    fn execute_with_uniarg_stops_at_first_failure() {
        let mut t = editor();
        let mut calls = 0;
        assert!(!t.editor.execute_with_uniarg(5, |_| {
            calls += 1;
            calls < 3
        }));
        assert_eq!(calls, 3);

        let mut calls = 0;
        assert!(t.editor.execute_with_uniarg(-2, |_| {
            calls += 1;
            false
        }));
        assert_eq!(calls, 0);
    }

    #[test]
    fn unbound_sequence_is_reported() {
        let mut t = editor();
        t.terminal.feed(&[KeyEvent::ctrl('x'), KeyEvent::ctrl('z')]);
        assert!(!t.editor.get_and_run_command());
        assert_eq!(
            t.messages.last_error().as_deref(),
            Some("C-x C-z is undefined")
        );
        assert_eq!(t.undo.begin_count(), 0);
    }
}
