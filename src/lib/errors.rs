use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating the launcher configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize the document into the expected shape.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Configuration file {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: String },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: String,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }

    pub fn missing(path: &std::path::Path, field: impl Into<String>) -> Self {
        Self::MissingField {
            path: path.to_path_buf(),
            field: field.into(),
        }
    }

    pub fn invalid(
        path: &std::path::Path,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            path: path.to_path_buf(),
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Reasons an interactive prompt did not produce a value.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Operator pressed Esc or Ctrl-C.
    #[error("prompt was interrupted")]
    Interrupted,
    /// Operator sent end-of-input (Ctrl-D).
    #[error("prompt input reached end of stream")]
    Eof,
    /// Standard input is not attached to a terminal.
    #[error("standard input is not an interactive terminal")]
    NotInteractive,
    /// Nothing to choose from.
    #[error("prompt `{label}` has no items to choose from")]
    NoItems { label: &'static str },
    /// Prompt answered with an index outside its item list.
    #[error("prompt `{label}` returned unknown choice {index}")]
    UnknownChoice { label: &'static str, index: usize },
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Failure to set up the log output.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to initialize tracing: {message}")]
    Init { message: String },
}

/// Failure of a single OS command invocation.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("command exited abnormally (exit={exit_code:?}): {message}")]
    ExitStatus {
        exit_code: Option<i32>,
        message: String,
    },
}
