//! Command-line argument parsing.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// What the command line asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Configuration file to use instead of the default one.
    pub config: Option<PathBuf>,
    /// Initial buffer text; point starts at its end.
    pub text: Option<String>,
    /// Print the binding table and exit.
    pub list_bindings: bool,
    /// Keys to play, in chord notation.
    pub script: String,
}

pub const USAGE: &str = "usage: quill [--config FILE] [--text TEXT] [--list-bindings] [KEYS...]";

/// Parse command-line arguments.
pub fn parse_args() -> Result<Options> {
    parse(std::env::args().skip(1))
}

fn parse(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();
    let mut script = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a file")?;
                options.config = Some(PathBuf::from(path));
            }
            "--text" => {
                options.text = Some(args.next().context("--text needs a value")?);
            }
            "--list-bindings" => options.list_bindings = true,
            "--" => script.extend(args.by_ref()),
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ => script.push(arg),
        }
    }

    options.script = script.concat();
    log::debug!("Parsed arguments: {options:?}");
    Ok(options)
}
