use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use engine_logging::{engine_debug, engine_info};

use crate::persist::write_marker;
use crate::{DeviceInventory, DriverError, Tokenizer};

/// What a completed run printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub lines: usize,
    pub tokens: usize,
    pub devices: u32,
}

/// Tokenizes an input file line by line, then reports the device count.
///
/// Every line produces one printed token list, in file order, followed by a
/// single `GPU count: N` line. Any error aborts the run where it occurs.
pub struct LineDriver<'a> {
    tokenizer: &'a dyn Tokenizer,
    devices: &'a dyn DeviceInventory,
}

impl<'a> LineDriver<'a> {
    pub fn new(tokenizer: &'a dyn Tokenizer, devices: &'a dyn DeviceInventory) -> Self {
        Self { tokenizer, devices }
    }

    pub fn run<W: Write>(&self, input: &Path, out: &mut W) -> Result<RunSummary, DriverError> {
        let file = File::open(input).map_err(|e| DriverError::from_io(input, e))?;
        let reader = BufReader::new(file);

        let mut summary = RunSummary::default();
        for line in reader.lines() {
            let line = line.map_err(|e| DriverError::from_io(input, e))?;
            let tokens = self.tokenizer.tokenize(&line);
            engine_debug!("line {}: {} tokens", summary.lines + 1, tokens.len());
            writeln!(out, "{tokens:?}").map_err(output_error)?;
            summary.lines += 1;
            summary.tokens += tokens.len();
        }

        summary.devices = self.devices.count()?;
        writeln!(out, "GPU count: {}", summary.devices).map_err(output_error)?;
        out.flush().map_err(output_error)?;

        engine_info!(
            "Processed {} lines ({} tokens) from {:?}; {} devices",
            summary.lines,
            summary.tokens,
            input,
            summary.devices
        );
        Ok(summary)
    }

    /// [`LineDriver::run`], then write the completion marker to `marker`.
    ///
    /// The marker is only written after the run succeeded.
    pub fn run_with_marker<W: Write>(
        &self,
        input: &Path,
        marker: &Path,
        out: &mut W,
    ) -> Result<RunSummary, DriverError> {
        let summary = self.run(input, out)?;
        write_marker(marker).map_err(|e| DriverError::from_io(marker, e))?;
        engine_info!("Wrote completion marker to {:?}", marker);
        Ok(summary)
    }
}

fn output_error(source: std::io::Error) -> DriverError {
    DriverError::Io {
        path: "<output>".into(),
        source,
    }
}
