//! Key chords, their on-screen descriptions and the compact chord notation.
//!
//! A chord is a base [`KeyCode`] combined with Control/Meta [`KeyModifiers`].
//! Two textual forms exist:
//!
//! - the *description*, shown to the user (`C-x C-f`, `M-g`, `RET`, `<up>`);
//! - the *notation*, used by the default binding table, the config file and
//!   `execute-kbd-macro` (`\C-x\C-f`, `\M-g`, `\RET`, `\UP`).

use std::fmt;

use crate::error::{Error, Result};

bitflags::bitflags! {
    /// Modifier bits carried by a chord.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        const CONTROL = 0b0000_0001;
        const META = 0b0000_0010;
    }
}

impl KeyModifiers {
    pub const NONE: Self = Self::empty();
}

/// The base of a chord: a character or a named special key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Esc,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Left,
    Right,
    Up,
    Down,
    F(u8),
}

/// One keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// A plain character with no modifiers.
    #[must_use]
    pub const fn char(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::NONE)
    }

    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[must_use]
    pub const fn meta(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::META)
    }

    /// A named key (or a character) with no modifiers.
    #[must_use]
    pub const fn special(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// `M-0` .. `M-9` and `M--`: the chords that always start a numeric argument.
    #[must_use]
    pub fn is_meta_digit(&self) -> bool {
        self.modifiers.contains(KeyModifiers::META)
            && matches!(self.code, KeyCode::Char(ch) if ch.is_ascii_digit() || ch == '-')
    }

    /// `C-g`.
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        *self == Self::ctrl('g')
    }

    /// The decimal digit carried by this chord, ignoring Meta.
    #[must_use]
    pub fn digit(&self) -> Option<u32> {
        match self.code {
            KeyCode::Char(ch) if !self.modifiers.contains(KeyModifiers::CONTROL) => ch.to_digit(10),
            _ => None,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("C-")?;
        }
        if self.modifiers.contains(KeyModifiers::META) {
            f.write_str("M-")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("SPC"),
            KeyCode::Char(ch) => write!(f, "{ch}"),
            KeyCode::Enter => f.write_str("RET"),
            KeyCode::Tab => f.write_str("TAB"),
            KeyCode::Esc => f.write_str("ESC"),
            KeyCode::Backspace => f.write_str("<backspace>"),
            KeyCode::Delete => f.write_str("<delete>"),
            KeyCode::Insert => f.write_str("<insert>"),
            KeyCode::Home => f.write_str("<home>"),
            KeyCode::End => f.write_str("<end>"),
            KeyCode::PageUp => f.write_str("<prior>"),
            KeyCode::PageDown => f.write_str("<next>"),
            KeyCode::Left => f.write_str("<left>"),
            KeyCode::Right => f.write_str("<right>"),
            KeyCode::Up => f.write_str("<up>"),
            KeyCode::Down => f.write_str("<down>"),
            KeyCode::F(n) => write!(f, "<f{n}>"),
        }
    }
}

/// Named tokens of the chord notation. Longer tokens sharing a prefix come
/// first so `\F10` is not read as `\F1` followed by `0`.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("BACKSPACE", KeyCode::Backspace),
    ("DELETE", KeyCode::Delete),
    ("DOWN", KeyCode::Down),
    ("END", KeyCode::End),
    ("F10", KeyCode::F(10)),
    ("F11", KeyCode::F(11)),
    ("F12", KeyCode::F(12)),
    ("F1", KeyCode::F(1)),
    ("F2", KeyCode::F(2)),
    ("F3", KeyCode::F(3)),
    ("F4", KeyCode::F(4)),
    ("F5", KeyCode::F(5)),
    ("F6", KeyCode::F(6)),
    ("F7", KeyCode::F(7)),
    ("F8", KeyCode::F(8)),
    ("F9", KeyCode::F(9)),
    ("HOME", KeyCode::Home),
    ("INSERT", KeyCode::Insert),
    ("LEFT", KeyCode::Left),
    ("NEXT", KeyCode::PageDown),
    ("PAGEDOWN", KeyCode::PageDown),
    ("PAGEUP", KeyCode::PageUp),
    ("PRIOR", KeyCode::PageUp),
    ("RET", KeyCode::Enter),
    ("RIGHT", KeyCode::Right),
    ("SPC", KeyCode::Char(' ')),
    ("TAB", KeyCode::Tab),
    ("UP", KeyCode::Up),
    ("e", KeyCode::Esc),
    ("\\", KeyCode::Char('\\')),
];

/// Parse chord notation into a key sequence.
///
/// `\C-` and `\M-` accumulate modifiers for the next chord; `\RET`, `\TAB`,
/// `\e` and friends name special keys; any other character stands for itself.
/// An empty string is an empty sequence.
pub fn parse_keys(notation: &str) -> Result<Vec<KeyEvent>> {
    let invalid = || Error::InvalidKeyNotation(notation.to_owned());
    let mut keys = Vec::new();
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = notation;

    while let Some(ch) = rest.chars().next() {
        if ch != '\\' {
            keys.push(KeyEvent::new(KeyCode::Char(ch), modifiers));
            modifiers = KeyModifiers::NONE;
            rest = &rest[ch.len_utf8()..];
            continue;
        }

        let token = &rest[1..];
        if let Some(after) = token.strip_prefix("C-") {
            modifiers |= KeyModifiers::CONTROL;
            rest = after;
        } else if let Some(after) = token.strip_prefix("M-") {
            modifiers |= KeyModifiers::META;
            rest = after;
        } else {
            let (name, code) = NAMED_KEYS
                .iter()
                .find(|(name, _)| token.starts_with(name))
                .ok_or_else(invalid)?;
            keys.push(KeyEvent::new(*code, modifiers));
            modifiers = KeyModifiers::NONE;
            rest = &token[name.len()..];
        }
    }

    if modifiers.is_empty() {
        Ok(keys)
    } else {
        // A trailing `\C-` with nothing to modify.
        Err(invalid())
    }
}

/// Render a key sequence for the user, chords separated by spaces.
#[must_use]
pub fn describe_keys(keys: &[KeyEvent]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a key sequence back into chord notation that [`parse_keys`] reads
/// back unchanged. Sequences the notation cannot spell, such as `\F1`
/// followed by a plain `0`, are refused rather than written ambiguously.
pub fn to_notation(keys: &[KeyEvent]) -> Result<String> {
    let mut out = String::new();
    for key in keys {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            out.push_str("\\C-");
        }
        if key.modifiers.contains(KeyModifiers::META) {
            out.push_str("\\M-");
        }
        match key.code {
            KeyCode::Char('\\') => out.push_str("\\\\"),
            KeyCode::Char(ch) => out.push(ch),
            KeyCode::F(n) => out.push_str(&format!("\\F{n}")),
            code => {
                if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, named)| *named == code) {
                    out.push('\\');
                    out.push_str(name);
                }
            }
        }
    }

    if parse_keys(&out).ok().as_deref() == Some(keys) {
        Ok(out)
    } else {
        Err(Error::UnwritableKeys(describe_keys(keys)))
    }
}
