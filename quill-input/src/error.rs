//! Errors reported by the input core.
//!
//! Every variant renders as the message shown to the user in the minibuffer.
//! None of them is fatal: they are reported at the command boundary and the
//! dispatch loop carries on with the next key.

/// An error raised while resolving keys or running an input command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The typed key sequence resolves to nothing.
    #[error("{0} is undefined")]
    UnboundSequence(String),
    /// A chord-notation string could not be parsed.
    #[error("Key sequence {0} is invalid")]
    InvalidKeyNotation(String),
    #[error("Already defining a keyboard macro")]
    AlreadyDefining,
    #[error("Not defining a keyboard macro")]
    NotDefining,
    #[error("No kbd macro has been defined")]
    NoMacroDefined,
    /// A command name is not present in the registry.
    #[error("No such function `{0}'")]
    UnknownCommand(String),
    /// The keys have no spelling in chord notation that reads back as the
    /// same keys, e.g. `<f1>` followed by the digit `0`.
    #[error("Key sequence {0} cannot be written as notation")]
    UnwritableKeys(String),
    /// The root of the binding trie cannot carry a command.
    #[error("Cannot bind an empty key sequence")]
    EmptyKeySequence,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
