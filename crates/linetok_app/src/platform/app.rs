//! Run orchestration shared by both binaries.

use std::io;
use std::process::ExitCode;

use engine_logging::{engine_error, engine_info};
use linetok_engine::{DriverError, LineDriver, NvmlInventory, RunSummary};

use super::cli::{CommonArgs, MarkCli, TokenizeCli};
use super::config::RunConfig;
use super::logging;

/// `linetok <INPUT>`
pub fn run_tokenize(cli: TokenizeCli) -> anyhow::Result<RunSummary> {
    let config = prepare(&cli.common)?;
    let tokenizer = config.tokenizer.build();
    let devices = init_devices()?;
    let driver = LineDriver::new(tokenizer.as_ref(), &devices);

    let stdout = io::stdout();
    let summary = driver.run(&cli.input, &mut stdout.lock())?;
    Ok(summary)
}

/// `linetok-mark <INPUT> <OUTPUT>`
pub fn run_mark(cli: MarkCli) -> anyhow::Result<RunSummary> {
    let config = prepare(&cli.common)?;
    let tokenizer = config.tokenizer.build();
    let devices = init_devices()?;
    let driver = LineDriver::new(tokenizer.as_ref(), &devices);

    let stdout = io::stdout();
    let summary = driver.run_with_marker(&cli.input, &cli.output, &mut stdout.lock())?;
    Ok(summary)
}

fn init_devices() -> Result<NvmlInventory, DriverError> {
    let devices = NvmlInventory::init()?;
    engine_info!("NVML available: {}", devices.is_available());
    Ok(devices)
}

fn prepare(args: &CommonArgs) -> anyhow::Result<RunConfig> {
    let config = RunConfig::resolve(args)?;
    logging::initialize(config.level_filter(args.verbose), config.log_file.as_deref());
    engine_info!(
        "linetok {} starting with {} tokenizer",
        env!("CARGO_PKG_VERSION"),
        config.tokenizer
    );
    Ok(config)
}

/// Report a run result on stderr and map it to the process exit status.
pub fn finish(result: anyhow::Result<RunSummary>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            engine_error!("run failed: {:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<DriverError>()
        .map_or(1, DriverError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_follows_driver_error() {
        let usage = anyhow::Error::from(DriverError::MissingArgument("<INPUT>".into()));
        assert_eq!(exit_code(&usage), 2);

        let access = anyhow::Error::from(DriverError::FileNotFound {
            path: "in.txt".into(),
        });
        assert_eq!(exit_code(&access), 1);

        assert_eq!(exit_code(&anyhow::anyhow!("bad config")), 1);
    }

    #[test]
    fn finish_reports_failures_with_their_exit_status() {
        engine_logging::initialize_for_tests();
        assert_eq!(finish(Ok(RunSummary::default())), ExitCode::SUCCESS);

        let usage = DriverError::MissingArgument("<OUTPUT>".into());
        assert_eq!(finish(Err(usage.into())), ExitCode::from(2));

        let denied = DriverError::PermissionDenied {
            path: "done.txt".into(),
        };
        assert_eq!(finish(Err(denied.into())), ExitCode::from(1));
    }
}
