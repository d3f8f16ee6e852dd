//! Run configuration: defaults, an optional RON file, then CLI overrides.
//!
//! ```ron
//! (
//!     tokenizer: whitespace,
//!     log_level: info,
//!     log_file: Some("linetok.log"),
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use engine_logging::raise_level;
use linetok_engine::TokenizerKind;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use super::cli::CommonArgs;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub tokenizer: TokenizerKind,
    pub log_level: LogLevel,
    pub log_file: Option<PathBuf>,
}

impl RunConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        ron::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Defaults, overlaid by `--config` if given, overlaid by the other flags.
    pub fn resolve(args: &CommonArgs) -> anyhow::Result<Self> {
        let base = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.merge_cli(args))
    }

    pub fn merge_cli(mut self, args: &CommonArgs) -> Self {
        if let Some(kind) = args.tokenizer {
            self.tokenizer = kind;
        }
        if let Some(path) = &args.log_file {
            self.log_file = Some(path.clone());
        }
        self
    }

    pub fn level_filter(&self, verbosity: u8) -> LevelFilter {
        raise_level(self.log_level.into(), verbosity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_yields_defaults() {
        let config: RunConfig = ron::from_str("()").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.tokenizer, TokenizerKind::Treebank);
        assert_eq!(config.level_filter(0), LevelFilter::Warn);
    }

    #[test]
    fn cli_flags_override_file_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("linetok.ron");
        fs::write(
            &path,
            "(tokenizer: whitespace, log_level: info, log_file: Some(\"file.log\"))",
        )
        .unwrap();

        let args = CommonArgs {
            config: Some(path.clone()),
            log_file: Some(PathBuf::from("cli.log")),
            ..CommonArgs::default()
        };
        let config = RunConfig::resolve(&args).unwrap();

        assert_eq!(config.tokenizer, TokenizerKind::Whitespace);
        assert_eq!(config.log_file, Some(PathBuf::from("cli.log")));
        assert_eq!(config.level_filter(1), LevelFilter::Debug);

        let args = CommonArgs {
            config: Some(path),
            tokenizer: Some(TokenizerKind::Treebank),
            ..CommonArgs::default()
        };
        let config = RunConfig::resolve(&args).unwrap();
        assert_eq!(config.tokenizer, TokenizerKind::Treebank);
        assert_eq!(config.log_file, Some(PathBuf::from("file.log")));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let args = CommonArgs {
            config: Some(temp.path().join("absent.ron")),
            ..CommonArgs::default()
        };
        let err = RunConfig::resolve(&args).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.ron");
        fs::write(&path, "(tokenizer: bpe)").unwrap();
        let err = RunConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
