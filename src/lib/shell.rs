//! Running command lines through the OS command interpreter.

use std::{process::Stdio, time::Duration};

use tokio::{
    io::{AsyncRead, AsyncReadExt},
    process::Command,
};
use tracing::debug;

use crate::lib::errors::CommandError;

#[cfg(windows)]
pub const DEFAULT_SHELL: &str = "cmd";
#[cfg(windows)]
pub const DEFAULT_SHELL_ARGS: &[&str] = &["/c"];
#[cfg(not(windows))]
pub const DEFAULT_SHELL: &str = "sh";
#[cfg(not(windows))]
pub const DEFAULT_SHELL_ARGS: &[&str] = &["-c"];

/// Mask written in place of secrets in logged command lines.
pub const REDACTED: &str = "****";
const OUTPUT_EXCERPT_LIMIT: usize = 512;
/// How long to keep reading output once the interpreter has exited.
///
/// Programs started in the background (`start mstsc`) inherit the pipes and
/// keep them open for their whole lifetime.
const PIPE_GRACE: Duration = Duration::from_millis(200);

/// Interpreter that receives each command line as its final argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInterpreter {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ShellInterpreter {
    fn default() -> Self {
        Self {
            program: DEFAULT_SHELL.to_string(),
            args: DEFAULT_SHELL_ARGS.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

/// A command line plus the form of it that is safe to write to logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ShellCommand {
    line: String,
    display: String,
}

impl ShellCommand {
    pub fn new(line: impl Into<String>) -> Self {
        let line = line.into();
        Self {
            display: line.clone(),
            line,
        }
    }

    /// Build a command whose logged form differs from the executed line.
    pub fn with_display(line: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            display: display.into(),
        }
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

impl std::fmt::Debug for ShellCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShellCommand").field(&self.display).finish()
    }
}

/// Executes command lines. Implemented by [`ShellRunner`] and by test doubles.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&mut self, command: &ShellCommand) -> Result<(), CommandError>;
}

/// Runs commands through the configured interpreter and waits for them.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    interpreter: ShellInterpreter,
}

impl ShellRunner {
    pub fn new(interpreter: ShellInterpreter) -> Self {
        Self { interpreter }
    }

    fn build_command(&self, command: &ShellCommand) -> Command {
        let mut process = Command::new(&self.interpreter.program);
        process.args(&self.interpreter.args);
        // cmd.exe parses its own command line, so pass it through unquoted
        #[cfg(windows)]
        process.raw_arg(command.line());
        #[cfg(not(windows))]
        process.arg(command.line());
        process
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        process
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&mut self, command: &ShellCommand) -> Result<(), CommandError> {
        debug!(
            target: "mstsc_launcher::shell",
            shell = %self.interpreter.program,
            command = %command.display(),
            "Executing command"
        );

        let mut child = self
            .build_command(command)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: self.interpreter.program.clone(),
                source,
            })?;
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = {
            let drain = async {
                tokio::join!(
                    collect(stdout_pipe, &mut stdout),
                    collect(stderr_pipe, &mut stderr)
                )
            };
            tokio::pin!(drain);

            let mut drained = false;
            let status = loop {
                tokio::select! {
                    status = child.wait() => break status,
                    _ = &mut drain, if !drained => drained = true,
                }
            };
            if !drained && tokio::time::timeout(PIPE_GRACE, &mut drain).await.is_err() {
                debug!(
                    target: "mstsc_launcher::shell",
                    command = %command.display(),
                    "Output still held open by a background process; not waiting for it"
                );
            }
            status
        }
        .map_err(|source| CommandError::Spawn {
            program: self.interpreter.program.clone(),
            source,
        })?;

        if status.success() {
            return Ok(());
        }

        Err(CommandError::ExitStatus {
            exit_code: status.code(),
            message: output_excerpt(&stdout, &stderr),
        })
    }
}

/// Append everything read from `pipe` to `buf` until end of stream.
async fn collect<R: AsyncRead + Unpin>(pipe: Option<R>, buf: &mut Vec<u8>) {
    let Some(mut pipe) = pipe else {
        return;
    };
    let mut chunk = [0u8; 1024];
    while let Ok(read) = pipe.read(&mut chunk).await {
        if read == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..read]);
    }
}

fn output_excerpt(stdout: &[u8], stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(stdout)
    } else {
        stderr
    };
    text.trim().chars().take(OUTPUT_EXCERPT_LIMIT).collect()
}
