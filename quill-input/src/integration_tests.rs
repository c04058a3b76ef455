//! Integration tests for key dispatch.
//!
//! These tests type key sequences at a scripted terminal and run the
//! dispatch loop, then check the buffer, the minibuffer and the recorder,
//! simulating real user input.

use crate::config::QuillConfig;
use crate::key::{parse_keys, KeyEvent};
use crate::memory::UndoMark;
use crate::operations::BindingOps;
use crate::test_helpers::{editor, editor_with_config, TestEditor};

fn keys(notation: &str) -> Vec<KeyEvent> {
    parse_keys(notation).expect("valid notation")
}

fn last_macro(t: &TestEditor) -> Option<Vec<KeyEvent>> {
    t.editor.recorder().last_macro().map(<[KeyEvent]>::to_vec)
}

// --- Key sequences ---

#[test]
fn prefix_sequence_runs_bound_command_with_feedback() {
    let mut t = editor("");
    t.run("\\C-x\\C-f");
    assert_eq!(t.text(), "[find-file]");
    assert!(t.messages.writes().contains(&"C-x -".to_string()));
    assert_eq!(
        t.editor.last_command().map(|command| command.name()),
        Some("find-file")
    );
}

#[test]
fn unbound_sequence_reports_undefined() {
    let mut t = editor("text");
    t.run("\\C-x\\C-z");
    assert_eq!(t.text(), "text");
    assert_eq!(
        t.messages.last_error().as_deref(),
        Some("C-x C-z is undefined")
    );
}

#[test]
fn extending_a_binding_turns_it_into_a_prefix() {
    let mut t = editor("");
    t.run("\\M-g");
    assert_eq!(t.text(), "[goto-line]");

    t.editor
        .bind_key(&keys("\\M-g\\M-g"), "goto-line-exact")
        .expect("bind");
    t.run("\\M-g\\M-g");
    assert_eq!(t.text(), "[goto-line][goto-line-exact]");

    // Alone, M-g now waits for another key; the exhausted script quits it.
    t.run("\\M-g");
    assert!(t.messages.writes().contains(&"M-g -".to_string()));
    assert_eq!(
        t.messages.last_error().as_deref(),
        Some("M-g C-g is undefined")
    );
    assert_eq!(t.text(), "[goto-line][goto-line-exact]");
}

#[test]
fn configured_bindings_override_defaults() {
    let config = QuillConfig::default().with_key_binding("\\C-d", "newline");
    let mut t = editor_with_config("", "", &config);
    t.run("a\\C-db");
    assert_eq!(t.text(), "a\nb");
}

#[test]
fn control_chord_bound_to_self_insert_inserts_base_character() {
    let config = QuillConfig::default().with_key_binding("\\C-a", "self-insert-command");
    let mut t = editor_with_config("", "", &config);
    t.run("x\\C-a\\C-u2\\C-a");
    assert_eq!(t.text(), "xaaa");
}

#[test]
fn unknown_configured_command_fails_editor_construction() {
    use crate::memory::{MessageLine, RopeBuffer, ScriptedTerminal, UndoJournal};
    use crate::state::{Collaborators, Editor};

    let config = QuillConfig::default().with_key_binding("\\C-c", "no-such-command");
    let collaborators = Collaborators::new(
        ScriptedTerminal::new(),
        RopeBuffer::new(),
        UndoJournal::new(),
        MessageLine::new(),
    );
    let result = Editor::new(collaborators, &config);
    assert!(matches!(
        result,
        Err(crate::Error::UnknownCommand(name)) if name == "no-such-command"
    ));
}

// --- Numeric arguments ---

#[test]
fn meta_digits_build_a_decimal_argument() {
    let mut t = editor("");
    t.run("\\M-3\\M-2a");
    assert_eq!(t.text(), "a".repeat(32));
}

#[test]
fn control_u_multiplies_by_four() {
    let mut t = editor("");
    t.run("\\C-ua");
    assert_eq!(t.text(), "aaaa");
    t.run("\\C-u\\C-ub");
    assert_eq!(t.text(), format!("aaaa{}", "b".repeat(16)));
}

#[test]
fn argument_applies_to_one_command_only() {
    let mut t = editor("");
    t.run("\\C-u3ab");
    assert_eq!(t.text(), "aaab");
}

#[test]
fn argument_is_echoed_before_prefix_keys() {
    let mut t = editor("");
    t.run("\\C-u12\\C-x\\C-f");
    assert!(t.messages.writes().contains(&"C-u 1 2 C-x -".to_string()));
    assert_eq!(t.text(), "[find-file]".repeat(12));
}

#[test]
fn negative_argument_deletes_backwards() {
    let mut t = editor("abcdef");
    t.run("\\M--\\M-2\\C-d");
    assert_eq!(t.text(), "abcd");
}

#[test]
fn quitting_an_argument_runs_nothing() {
    let mut t = editor("");
    t.run("\\C-u5\\C-ga");
    assert_eq!(t.text(), "a");
    assert_eq!(t.messages.last_error().as_deref(), Some("Quit"));
}

// --- Keyboard macros ---

#[test]
fn macro_excludes_start_and_end_keys() {
    let mut t = editor("");
    t.run("\\C-x(ab\\C-x)");
    assert_eq!(last_macro(&t), Some(keys("ab")));
    assert!(!t.editor.recorder().is_recording());
    assert!(t
        .messages
        .writes()
        .contains(&"Defining keyboard macro...".to_string()));
}

#[test]
fn replay_repeats_what_was_typed() {
    let mut t = editor("");
    t.run("\\C-x(x\\C-x\\C-fy\\C-x)");
    assert_eq!(t.text(), "x[find-file]y");
    assert_eq!(last_macro(&t), Some(keys("x\\C-x\\C-fy")));

    t.run("\\C-xe");
    assert_eq!(t.text(), "x[find-file]yx[find-file]y");
}

#[test]
fn replay_with_argument_repeats_macro() {
    let mut t = editor("");
    t.run("\\C-x(ab\\C-x)");
    t.run("\\C-u3\\C-xe");
    assert_eq!(t.text(), "ab".repeat(4));
}

#[test]
fn numeric_argument_inside_macro_is_recorded_with_its_command() {
    let mut t = editor("");
    t.run("\\C-x(\\C-u3x\\C-x)");
    assert_eq!(t.text(), "xxx");
    assert_eq!(last_macro(&t), Some(keys("\\C-u3x")));

    t.run("\\C-xe");
    assert_eq!(t.text(), "xxxxxx");
}

#[test]
fn replay_while_recording_records_replayed_keys() {
    let mut t = editor("");
    t.run("\\C-x(ab\\C-x)");
    t.run("\\C-x(\\C-xec\\C-x)");
    assert_eq!(t.text(), "ababc");
    assert_eq!(last_macro(&t), Some(keys("abc")));

    t.run("\\C-xe");
    assert_eq!(t.text(), "ababcabc");
}

#[test]
fn prompt_input_is_recorded_and_replayed() {
    let mut t = editor("");
    t.run("\\C-x(\\M-xnewline\\RET\\C-x)");
    assert_eq!(t.text(), "\n");
    assert_eq!(last_macro(&t), Some(keys("\\M-xnewline\\RET")));

    t.run("\\C-xe");
    assert_eq!(t.text(), "\n\n");
}

#[test]
fn undefined_key_is_left_out_of_macro() {
    let mut t = editor("");
    t.run("\\C-x(a\\C-x\\C-zb\\C-x)");
    assert_eq!(last_macro(&t), Some(keys("ab")));
    assert!(t.messages.errors().contains(&"C-x C-z is undefined".to_string()));
}

#[test]
fn failing_command_is_still_recorded() {
    let mut t = editor("");
    t.run("\\C-x(\\C-da\\C-x)");
    assert_eq!(t.text(), "a");
    assert!(t.messages.errors().contains(&"End of buffer".to_string()));
    assert_eq!(last_macro(&t), Some(keys("\\C-da")));
}

#[test]
fn keyboard_quit_cancels_definition() {
    let mut t = editor("");
    t.run("\\C-x(old\\C-x)");
    t.run("\\C-x(new\\C-g");
    assert!(!t.editor.recorder().is_recording());
    assert_eq!(t.messages.last_error().as_deref(), Some("Quit"));
    assert_eq!(last_macro(&t), Some(keys("old")));
}

#[test]
fn macro_commands_report_state_errors() {
    let mut t = editor("");
    t.run("\\C-x)");
    assert_eq!(
        t.messages.last_error().as_deref(),
        Some("Not defining a keyboard macro")
    );
    t.run("\\C-xe");
    assert_eq!(
        t.messages.last_error().as_deref(),
        Some("No kbd macro has been defined")
    );
    t.run("\\C-x(\\C-x(");
    assert_eq!(
        t.messages.last_error().as_deref(),
        Some("Already defining a keyboard macro")
    );
    assert!(t.editor.recorder().is_recording());
}

#[test]
fn execute_kbd_macro_reads_notation_at_prompt() {
    let mut t = editor("");
    t.run("\\M-xexecute-kbd-macro\\RETab\\RET");
    assert_eq!(t.text(), "ab");
}

// --- Undo bracketing ---

#[test]
fn every_command_gets_one_undo_sequence() {
    let mut t = editor("");
    t.run("ab\\C-x\\C-z\\C-d");
    // The undefined sequence runs no command.
    assert_eq!(t.undo.begin_count(), 3);
    assert_eq!(t.undo.end_count(), 3);
    assert_eq!(t.undo.max_depth(), 1);
}

#[test]
fn replayed_commands_nest_inside_the_replaying_one() {
    let mut t = editor("");
    t.run("\\C-x(ab\\C-x)");
    let before = t.undo.marks().len();
    t.run("\\C-xe");

    let marks = t.undo.marks().split_off(before);
    assert_eq!(
        marks,
        vec![
            UndoMark::Begin,
            UndoMark::Begin,
            UndoMark::End,
            UndoMark::Begin,
            UndoMark::End,
            UndoMark::End,
        ]
    );
    assert_eq!(t.undo.depth(), 0);
}

// --- Help and rebinding ---

#[test]
fn where_is_names_every_binding() {
    let mut t = editor("");
    t.run("\\C-hwstart-kbd-macro\\RET");
    assert_eq!(
        t.messages.current().as_deref(),
        Some("start-kbd-macro is on C-x (")
    );
    t.run("\\C-hwlist-bindings\\RET");
    assert_eq!(
        t.messages.current().as_deref(),
        Some("list-bindings is not on any key")
    );
}

#[test]
fn describe_bindings_opens_help_popup() {
    let mut t = editor("");
    t.run("\\C-hb");
    let popups = t.messages.popups();
    assert_eq!(popups.len(), 1);
    assert_eq!(popups[0].0, "*Help*");
    assert!(popups[0].1.starts_with("Key translations:\n"));
    let row = format!("{:<15} find-file\n", "C-x C-f");
    assert!(popups[0].1.contains(&row));
}

#[test]
fn global_set_key_prompts_for_keys_and_command() {
    let mut t = editor("");
    t.run("\\M-xglobal-set-key\\RET\\C-cwhere-is\\RET");
    assert!(t.messages.writes().contains(&"Set key globally: ".to_string()));
    assert!(t
        .messages
        .writes()
        .contains(&"Set key C-c to command: ".to_string()));

    t.run("\\C-cwhere-is\\RET");
    assert_eq!(
        t.messages.current().as_deref(),
        Some("where-is is on C-h w, <f1> w, C-c")
    );
}
