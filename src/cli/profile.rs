//! LaunchProfile and log/config resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

use crate::lib::telemetry::LogSettings;

/// Config file stem looked up in the working directory (`config.toml`, `config.yaml`, ...).
const DEFAULT_CONFIG_STEM: &str = "config";
pub const DEFAULT_LOGFILE: &str = "./output.log";
pub const CONFIG_ENV_KEY: &str = "MSTSC_LAUNCHER_CONFIG";

/// Log destination selected by `--out`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    File,
}

impl LogOutput {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogOutput::Stdout => "stdout",
            LogOutput::Stderr => "stderr",
            LogOutput::File => "file",
        }
    }
}

/// Log level selected by `--level`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl LogLevel {
    /// `fatal` and `panic` have no tracing equivalent and collapse to `error`.
    pub const fn level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => LevelFilter::ERROR,
        }
    }

    pub const fn directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => "error",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: PathBuf,
    pub log: LogSettings,
    pub launch_args: Vec<String>,
}

/// Resolve config path in the order: CLI override → env var → `./config.*`.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    let path = override_path
        .or_else(|| {
            env::var_os(CONFIG_ENV_KEY)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_STEM));

    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(cwd.join(path))
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(log: &LogSettings, config: &std::path::Path) -> Vec<String> {
    vec![
        format!("--out={}", log.output.as_str()),
        format!("--logfile={}", log.logfile.display()),
        format!("--level={}", log.level.directive()),
        format!("--config={}", config.display()),
    ]
}
