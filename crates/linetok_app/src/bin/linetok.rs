use std::process::ExitCode;

use linetok_app::{finish, parse_args, run_tokenize, TokenizeCli};

fn main() -> ExitCode {
    let result = parse_args::<TokenizeCli, _, _>(std::env::args_os())
        .map_err(anyhow::Error::from)
        .and_then(run_tokenize);
    finish(result)
}
