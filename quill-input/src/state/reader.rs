//! Reading whole key sequences.

use super::Editor;
use crate::key::{describe_keys, KeyEvent};
use crate::keymap::Lookup;

impl Editor {
    /// Read keys until they form a bound sequence or stop matching anything.
    ///
    /// While the keys so far are only a prefix, the minibuffer shows them
    /// followed by ` -`, after any pending numeric argument.
    pub fn get_key_sequence(&mut self) -> Vec<KeyEvent> {
        let mut keys = vec![self.get_key()];
        while self.is_prefix(&keys) {
            let prompt = format!("{}{} -", self.numeric_prefix_text(), describe_keys(&keys));
            self.minibuffer.write(&prompt);
            let key = self.get_key();
            self.minibuffer.clear();
            keys.push(key);
        }
        keys
    }

    fn is_prefix(&self, keys: &[KeyEvent]) -> bool {
        self.keymap.command_for(keys).is_none()
            && matches!(self.keymap.lookup(keys), Lookup::Prefix(_))
    }

    /// `C-u 1 2 ` style rendering of the argument the previous command set.
    pub(crate) fn numeric_prefix_text(&self) -> String {
        let flags = self.last_flags;
        let mut text = String::new();
        if !flags.set_uniarg {
            return text;
        }
        text.push_str("C-u ");
        if !flags.uniarg_empty {
            if flags.uniarg < 0 {
                text.push_str("- ");
            }
            for digit in flags.uniarg.unsigned_abs().to_string().chars() {
                text.push(digit);
                text.push(' ');
            }
        }
        text
    }
}
