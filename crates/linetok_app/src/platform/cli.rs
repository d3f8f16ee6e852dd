//! Command-line surface for both binaries.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Args, Parser};
use linetok_engine::{DriverError, TokenizerKind};

/// Options shared by `linetok` and `linetok-mark`.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Tokenizer to split lines with: treebank or whitespace.
    #[arg(long, value_name = "KIND")]
    pub tokenizer: Option<TokenizerKind>,

    /// RON configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write log output to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Raise log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Tokenize every line of INPUT and report the GPU count.
#[derive(Debug, Parser)]
#[command(name = "linetok", version)]
pub struct TokenizeCli {
    /// Text file to tokenize, one record per line.
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Tokenize every line of INPUT, report the GPU count, then write `Done.` to OUTPUT.
#[derive(Debug, Parser)]
#[command(name = "linetok-mark", version)]
pub struct MarkCli {
    /// Text file to tokenize, one record per line.
    pub input: PathBuf,

    /// Completion marker file to create or overwrite.
    pub output: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Parse `args`, turning a missing positional into [`DriverError::MissingArgument`].
///
/// Help, version and any other usage error are handled by clap, which prints
/// and exits.
pub fn parse_args<P, I, T>(args: I) -> Result<P, DriverError>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match P::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            let missing = match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::Strings(names)) => names.join(", "),
                Some(ContextValue::String(name)) => name.clone(),
                _ => "<unknown>".to_string(),
            };
            Err(DriverError::MissingArgument(missing))
        }
        Err(err) => err.exit(),
    }
}
