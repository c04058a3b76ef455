//! Minibuffer line input.
//!
//! Prompts read their keys through the editor's key source like any other
//! command, so what is typed at a prompt is recorded into a keyboard macro
//! and read back from it on replay.

use unicode_segmentation::UnicodeSegmentation;

use crate::key::{KeyCode, KeyModifiers};
use crate::state::Editor;

impl Editor {
    /// Read a line of text after `prompt`.
    ///
    /// `RET` accepts, `C-g` quits and returns `None`, `BACKSPACE` removes the
    /// last character and `TAB` completes against `completions`.
    pub fn read_line(&mut self, prompt: &str, completions: &[&str]) -> Option<String> {
        let mut input = String::new();
        loop {
            self.minibuffer.write(&format!("{prompt}{input}"));
            let key = self.get_key();

            if key.is_cancel() {
                self.minibuffer.clear();
                self.keyboard_quit();
                return None;
            }
            if key.modifiers != KeyModifiers::NONE {
                self.minibuffer.ding();
                continue;
            }
            match key.code {
                KeyCode::Enter => {
                    self.minibuffer.clear();
                    return Some(input);
                }
                KeyCode::Backspace => {
                    if let Some((start, _)) = input.grapheme_indices(true).next_back() {
                        input.truncate(start);
                    } else {
                        self.minibuffer.ding();
                    }
                }
                KeyCode::Tab => self.complete(&mut input, completions),
                KeyCode::Char(ch) if !ch.is_control() => input.push(ch),
                _ => self.minibuffer.ding(),
            }
        }
    }

    /// Prompt for the name of a registered command. `None` when the prompt
    /// was quit or left empty.
    pub fn read_command_name(&mut self, prompt: &str) -> Option<String> {
        let names = self.registry.names();
        self.read_line(prompt, &names)
            .filter(|name| !name.is_empty())
    }

    fn complete(&mut self, input: &mut String, completions: &[&str]) {
        let matches: Vec<&str> = completions
            .iter()
            .copied()
            .filter(|candidate| candidate.starts_with(input.as_str()))
            .collect();
        let Some(common) = longest_common_prefix(&matches) else {
            self.minibuffer.ding();
            return;
        };
        if common.len() > input.len() {
            *input = common.to_string();
        } else if matches.len() > 1 {
            self.minibuffer.popup("*Completions*", &matches.join("\n"));
        }
    }
}

/// Longest prefix shared by every candidate; `None` if there are none.
fn longest_common_prefix<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    let (first, rest) = candidates.split_first()?;
    let mut len = first.len();
    for candidate in rest {
        len = first
            .char_indices()
            .zip(candidate.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, a), _)| i + a.len_utf8())
            .min(len);
    }
    Some(&first[..len])
}
