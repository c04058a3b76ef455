//! Entry point for the quill binary.
//!
//! Plays a key script against an in-memory buffer and prints the result.

mod args;
mod tracing_setup;

use anyhow::Result;
use quill_input::host::Buffer;
use quill_input::memory::{MessageLine, RopeBuffer, ScriptedTerminal, UndoJournal};
use quill_input::operations::BindingOps;
use quill_input::{describe_keys, to_notation, Collaborators, Editor, QuillConfig};

#[allow(clippy::print_stdout, clippy::print_stderr)]
fn main() -> Result<()> {
    let options = args::parse_args()?;

    let config = match &options.config {
        Some(path) => QuillConfig::load_from(path)?,
        None => QuillConfig::load_default().unwrap_or_else(|err| {
            eprintln!("Warning: failed to load config.toml: {err}");
            eprintln!("Using default configuration");
            QuillConfig::default()
        }),
    };

    tracing_setup::init(&config.logging);

    log::info!("Starting quill");

    let terminal = ScriptedTerminal::from_notation(&options.script)?;
    let buffer = RopeBuffer::with_text(options.text.as_deref().unwrap_or_default());
    let messages = MessageLine::new();
    let collaborators = Collaborators::new(
        terminal,
        buffer.clone(),
        UndoJournal::new(),
        messages.clone(),
    );
    let mut editor = Editor::new(collaborators, &config)?;

    if options.list_bindings {
        print!("{}", editor.bindings_listing());
        return Ok(());
    }

    let span = tracing::info_span!("script", keys = editor.pending_keys());
    let count = span.in_scope(|| editor.run_until_idle());
    tracing::info!(count, "Script finished");

    println!("{}", buffer.contents());
    if let Some(message) = messages.current() {
        println!("-- {message}");
    }
    if let Some(keys) = editor.recorder().last_macro() {
        match to_notation(keys) {
            Ok(notation) => println!("-- last macro: {notation}"),
            Err(_) => println!("-- last macro: {}", describe_keys(keys)),
        }
    }
    Ok(())
}
