//! Text editing operations and the editing commands of the default table.

use crate::key::{KeyCode, KeyEvent, KeyModifiers};
use crate::keymap::command::CommandArgs;
use crate::state::Editor;

/// Extension trait for editing the buffer at point.
pub trait EditingOps {
    /// Insert `text` at point.
    fn insert_at_point(&mut self, text: &str) -> bool;
    /// Delete the character after point.
    fn delete_forward(&mut self) -> bool;
    /// Delete the character before point.
    fn delete_backward(&mut self) -> bool;
}

impl EditingOps for Editor {
    fn insert_at_point(&mut self, text: &str) -> bool {
        let point = self.buffer.point();
        self.buffer.insert(point, text);
        true
    }

    fn delete_forward(&mut self) -> bool {
        let point = self.buffer.point();
        if self.buffer.delete(point, 1) {
            true
        } else {
            self.minibuffer.error("End of buffer");
            false
        }
    }

    fn delete_backward(&mut self) -> bool {
        let point = self.buffer.point();
        if point > 0 && self.buffer.delete(point - 1, 1) {
            true
        } else {
            self.minibuffer.error("Beginning of buffer");
            false
        }
    }
}

/// The character a key inserts, if it inserts one. Control is dropped, so
/// `C-a` inserts `a`; Meta chords and named keys insert nothing.
fn insertable_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::META) => Some(ch),
        _ => None,
    }
}

pub(crate) fn self_insert_command(editor: &mut Editor, args: &CommandArgs) -> bool {
    let Some(ch) = editor.last_key().and_then(insertable_char) else {
        editor.minibuffer.ding();
        return false;
    };
    let text = ch.to_string();
    editor.execute_with_uniarg(args.uniarg, |editor| editor.insert_at_point(&text))
}

pub(crate) fn newline(editor: &mut Editor, args: &CommandArgs) -> bool {
    editor.execute_with_uniarg(args.uniarg, |editor| editor.insert_at_point("\n"))
}

pub(crate) fn delete_char(editor: &mut Editor, args: &CommandArgs) -> bool {
    if args.uniarg < 0 {
        return editor
            .execute_with_uniarg(args.uniarg.saturating_neg(), EditingOps::delete_backward);
    }
    editor.execute_with_uniarg(args.uniarg, EditingOps::delete_forward)
}

pub(crate) fn backward_delete_char(editor: &mut Editor, args: &CommandArgs) -> bool {
    if args.uniarg < 0 {
        return editor
            .execute_with_uniarg(args.uniarg.saturating_neg(), EditingOps::delete_forward);
    }
    editor.execute_with_uniarg(args.uniarg, EditingOps::delete_backward)
}
