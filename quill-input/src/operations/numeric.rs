//! Numeric argument and quit commands.

use crate::key::{KeyCode, KeyEvent, KeyModifiers};
use crate::keymap::command::CommandArgs;
use crate::state::Editor;

/// An argument being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Argument {
    magnitude: i64,
    negative: bool,
    digits: usize,
    /// Typed keys, for the minibuffer.
    echo: Vec<String>,
}

enum Step {
    Continue,
    /// The key ends the argument and is consumed.
    Finish,
    /// The key is not part of the argument and must be read again.
    Reject,
    Quit,
}

impl Argument {
    fn new() -> Self {
        Self {
            magnitude: 1,
            negative: false,
            digits: 0,
            echo: Vec::new(),
        }
    }

    /// Continue from an argument set by the previous command.
    fn resume(uniarg: i64, empty: bool) -> Self {
        let magnitude = uniarg.saturating_abs();
        let digits = if empty { 0 } else { magnitude.to_string().len() };
        let mut echo = vec!["C-u".to_string()];
        if uniarg < 0 {
            echo.push("-".to_string());
        }
        if !empty {
            echo.extend(magnitude.to_string().chars().map(String::from));
        }
        Self {
            magnitude,
            negative: uniarg < 0,
            digits,
            echo,
        }
    }

    fn is_empty(&self) -> bool {
        self.digits == 0 && !self.negative
    }

    fn value(&self) -> i64 {
        if self.negative {
            -self.magnitude
        } else {
            self.magnitude
        }
    }

    fn echo_token(&mut self, token: impl Into<String>) {
        if self.echo.is_empty() {
            self.echo.push("C-u".to_string());
        }
        self.echo.push(token.into());
    }

    fn feed(&mut self, key: KeyEvent) -> Step {
        if key.is_cancel() {
            return Step::Quit;
        }
        if let Some(digit) = key.digit() {
            self.magnitude = if self.digits == 0 {
                i64::from(digit)
            } else {
                self.magnitude.saturating_mul(10).saturating_add(i64::from(digit))
            };
            self.digits += 1;
            self.echo_token(digit.to_string());
            return Step::Continue;
        }
        if key == KeyEvent::ctrl('u') {
            if self.digits > 0 {
                return Step::Finish;
            }
            self.magnitude = self.magnitude.saturating_mul(4);
            self.echo.push("C-u".to_string());
            return Step::Continue;
        }
        let minus = key.code == KeyCode::Char('-')
            && !key.modifiers.contains(KeyModifiers::CONTROL);
        if minus && self.digits == 0 {
            if !self.negative {
                // A bare minus means -1, not -4.
                self.negative = true;
                self.magnitude = 1;
                self.echo_token("-");
            }
            return Step::Continue;
        }
        Step::Reject
    }
}

/// Keys that can invoke `universal-argument` and take part in the argument.
fn starts_argument(key: KeyEvent) -> bool {
    key == KeyEvent::ctrl('u') || key.is_meta_digit()
}

/// Read a numeric argument for the next command.
///
/// The invoking key counts as typed: `C-u` multiplies by four, a Meta digit
/// is the first digit and `M--` negates. An argument already given to this
/// command is continued.
pub(crate) fn universal_argument(editor: &mut Editor, args: &CommandArgs) -> bool {
    let mut arg = if args.explicit {
        Argument::resume(args.uniarg, editor.this_flags().uniarg_empty)
    } else {
        Argument::new()
    };

    let first = editor
        .last_key()
        .filter(|key| starts_argument(*key))
        .unwrap_or(KeyEvent::ctrl('u'));
    let mut step = arg.feed(first);

    while let Step::Continue = step {
        editor
            .minibuffer
            .write(&format!("{} -", arg.echo.join(" ")));
        let key = editor.get_key();
        step = arg.feed(key);
        if let Step::Reject = step {
            editor.unget_key(key);
        }
    }

    if let Step::Quit = step {
        editor.keyboard_quit();
        return false;
    }

    let value = arg.value();
    let empty = arg.is_empty();
    let flags = editor.this_flags_mut();
    flags.set_uniarg = true;
    flags.uniarg = value;
    flags.uniarg_empty = empty;
    editor.minibuffer.clear();
    log::trace!("Numeric argument {value}");
    true
}

pub(crate) fn keyboard_quit(editor: &mut Editor, _args: &CommandArgs) -> bool {
    editor.keyboard_quit();
    false
}
