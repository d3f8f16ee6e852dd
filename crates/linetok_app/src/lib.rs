//! Linetok app: command-line front end shared by the `linetok` and
//! `linetok-mark` binaries.
pub mod platform;

pub use platform::app::{finish, run_mark, run_tokenize};
pub use platform::cli::{parse_args, CommonArgs, MarkCli, TokenizeCli};
pub use platform::config::{LogLevel, RunConfig};
