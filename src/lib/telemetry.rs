//! Tracing initialization and run span helpers.

use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Instant,
};

use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, EnvFilter};
use uuid::Uuid;

use crate::{
    cli::{LogLevel, LogOutput},
    lib::errors::TelemetryError,
};

/// Where and how verbosely to log, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub output: LogOutput,
    pub logfile: PathBuf,
    pub level: LogLevel,
}

/// Initialize `tracing` for the selected output.
///
/// Directives in `RUST_LOG` are applied on top of `--level`.
pub fn init_tracing(settings: &LogSettings) -> Result<(), TelemetryError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let writer = make_writer(settings)?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(settings.level.level_filter().into())
        .from_env_lossy();
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .without_time()
        .with_ansi(settings.output != LogOutput::File)
        .with_writer(writer)
        .try_init()
        .map_err(|err| TelemetryError::Init {
            message: err.to_string(),
        })
}

fn make_writer(settings: &LogSettings) -> Result<BoxMakeWriter, TelemetryError> {
    let writer = match settings.output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::File => BoxMakeWriter::new(Mutex::new(open_log_file(&settings.logfile)?)),
    };
    Ok(writer)
}

/// Open (or create) the log file for appending.
pub fn open_log_file(path: &Path) -> Result<File, TelemetryError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TelemetryError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Span helper recording the start and end of one launcher run.
pub struct RunSpan {
    span: Span,
    started_at: Instant,
    run_id: Uuid,
}

impl RunSpan {
    pub fn start(app_name: &'static str) -> Self {
        let run_id = Uuid::new_v4();
        let span = info_span!(target: "mstsc_launcher::run", "launcher_run", %run_id, app_name);
        {
            let _entered = span.enter();
            info!(target: "mstsc_launcher::run", "Start {app_name} app");
        }
        Self {
            span,
            started_at: Instant::now(),
            run_id,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span while recording how the run ended.
    pub fn finish(self, outcome: &'static str) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "mstsc_launcher::run",
            run_id = %self.run_id,
            outcome,
            elapsed_ms,
            "End launcher run"
        );
    }
}
