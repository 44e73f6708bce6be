//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::{build_launch_args, resolve_config_path, LaunchProfile, LogLevel, LogOutput};
use crate::lib::telemetry::LogSettings;

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mstsc-launcher",
    author,
    version,
    about = "Terminal Services client launcher",
    long_about = "Pick a host and a user from the configuration file, cache the credential with \
                  cmdkey, start mstsc full screen and remove the cached credential again."
)]
pub struct LaunchArgs {
    /// Log output mode.
    #[arg(long, value_enum, default_value_t = LogOutput::File)]
    pub out: LogOutput,
    /// Log output filename (used with `--out file`).
    #[arg(long, default_value = super::profile::DEFAULT_LOGFILE)]
    pub logfile: PathBuf,
    /// Log level.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub level: LogLevel,
    /// Path to the configuration file (overrides MSTSC_LAUNCHER_CONFIG).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
}

impl LaunchArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn into_profile(self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override)?;
        let log = LogSettings {
            output: self.out,
            logfile: self.logfile,
            level: self.level,
        };
        let launch_args = build_launch_args(&log, &config_path);

        Ok(LaunchProfile {
            config_path,
            log,
            launch_args,
        })
    }
}
