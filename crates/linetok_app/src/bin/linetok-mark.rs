use std::process::ExitCode;

use linetok_app::{finish, parse_args, run_mark, MarkCli};

fn main() -> ExitCode {
    let result = parse_args::<MarkCli, _, _>(std::env::args_os())
        .map_err(anyhow::Error::from)
        .and_then(run_mark);
    finish(result)
}
