//! Test helpers for editor tests.
//!
//! Builds an `Editor` wired to in-memory collaborators and keeps a handle on
//! each of them so tests can feed keys and inspect the results. A few probe
//! commands are bound on top of the defaults; each inserts its own name in
//! brackets, so the buffer shows which commands ran and in what order.

use crate::config::QuillConfig;
use crate::host::Buffer;
use crate::key::parse_keys;
use crate::keymap::command::{Command, CommandArgs};
use crate::memory::{MessageLine, RopeBuffer, ScriptedTerminal, UndoJournal};
use crate::operations::BindingOps;
use crate::state::{Collaborators, Editor};

/// An editor plus handles on its collaborators.
pub struct TestEditor {
    pub editor: Editor,
    pub terminal: ScriptedTerminal,
    pub buffer: RopeBuffer,
    pub undo: UndoJournal,
    pub messages: MessageLine,
}

impl TestEditor {
    /// Feed keys in chord notation and run commands until they are used up.
    pub fn run(&mut self, notation: &str) -> usize {
        self.terminal
            .feed_notation(notation)
            .expect("key notation should be valid");
        self.editor.run_until_idle()
    }

    /// The buffer text.
    pub fn text(&self) -> String {
        self.buffer.contents()
    }
}

/// Insert `[name]` for the command being run, `uniarg` times.
fn probe(editor: &mut Editor, args: &CommandArgs) -> bool {
    let name = editor.this_command().map_or("?", |command| command.name());
    let text = format!("[{name}]");
    editor.execute_with_uniarg(args.uniarg, |editor| {
        let point = editor.buffer().point();
        editor.buffer_mut().insert(point, &text);
        true
    })
}

pub const PROBES: &[(&str, &str)] = &[
    ("\\C-x\\C-f", "find-file"),
    ("\\C-x\\C-s", "save-buffer"),
    ("\\M-g", "goto-line"),
];

/// An editor over a buffer holding `text`, with no keys queued.
pub fn editor(text: &str) -> TestEditor {
    editor_with_keys(text, "")
}

/// An editor over a buffer holding `text`, with `notation` queued on the
/// terminal.
pub fn editor_with_keys(text: &str, notation: &str) -> TestEditor {
    editor_with_config(text, notation, &QuillConfig::default())
}

pub fn editor_with_config(text: &str, notation: &str, config: &QuillConfig) -> TestEditor {
    let terminal = ScriptedTerminal::from_notation(notation).expect("key notation should be valid");
    let buffer = RopeBuffer::with_text(text);
    let undo = UndoJournal::new();
    let messages = MessageLine::new();
    let collaborators = Collaborators::new(
        terminal.clone(),
        buffer.clone(),
        undo.clone(),
        messages.clone(),
    );
    let mut editor = Editor::new(collaborators, config).expect("editor should build");

    for name in ["find-file", "save-buffer", "goto-line", "goto-line-exact"] {
        editor.registry_mut().register(Command::new(name, "Probe.", probe));
    }
    for (notation, name) in PROBES {
        let keys = parse_keys(notation).expect("probe notation should be valid");
        editor.bind_key(&keys, name).expect("probe should bind");
    }

    TestEditor {
        editor,
        terminal,
        buffer,
        undo,
        messages,
    }
}
