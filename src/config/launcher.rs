use std::{path::Path, time::Duration};

use serde::Deserialize;

use crate::lib::{errors::ConfigError, shell::ShellInterpreter};

pub const DEFAULT_CREDENTIAL_DELAY_SECS: u64 = 2;
pub const DEFAULT_LAUNCH_DELAY_SECS: u64 = 2;
pub const MAX_DELAY_SECS: u64 = 300;

/// Exit status used when the operator cancels the password prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCancelExit {
    Success,
    Failure,
}

impl PasswordCancelExit {
    pub const fn status(&self) -> u8 {
        match self {
            PasswordCancelExit::Success => 0,
            PasswordCancelExit::Failure => 1,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            PasswordCancelExit::Success => "success",
            PasswordCancelExit::Failure => "failure",
        }
    }
}

/// Command interpreter, step delays, and cancel policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherSection {
    pub shell: ShellInterpreter,
    pub credential_delay: Duration,
    pub launch_delay: Duration,
    pub password_cancel_exit: PasswordCancelExit,
}

impl Default for LauncherSection {
    fn default() -> Self {
        Self {
            shell: ShellInterpreter::default(),
            credential_delay: Duration::from_secs(DEFAULT_CREDENTIAL_DELAY_SECS),
            launch_delay: Duration::from_secs(DEFAULT_LAUNCH_DELAY_SECS),
            password_cancel_exit: PasswordCancelExit::Success,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawLauncherSection {
    pub shell: Option<String>,
    pub shell_args: Option<Vec<String>>,
    pub credential_delay_secs: Option<u64>,
    pub launch_delay_secs: Option<u64>,
    pub password_cancel_exit: Option<String>,
}

pub fn parse_launcher_section(
    raw: Option<RawLauncherSection>,
    path: &Path,
) -> Result<LauncherSection, ConfigError> {
    let launcher_raw = raw.unwrap_or_default();
    let defaults = LauncherSection::default();

    let shell = match launcher_raw.shell {
        Some(program) if program.trim().is_empty() => {
            return Err(ConfigError::invalid(
                path,
                "launcher.shell",
                "must not be empty",
            ))
        }
        Some(program) => ShellInterpreter {
            program: program.trim().to_string(),
            args: launcher_raw.shell_args.unwrap_or_default(),
        },
        None => ShellInterpreter {
            args: launcher_raw.shell_args.unwrap_or(defaults.shell.args),
            ..defaults.shell
        },
    };

    let credential_delay_secs = launcher_raw
        .credential_delay_secs
        .unwrap_or(DEFAULT_CREDENTIAL_DELAY_SECS);
    validate_delay(path, "launcher.credential_delay_secs", credential_delay_secs)?;

    let launch_delay_secs = launcher_raw
        .launch_delay_secs
        .unwrap_or(DEFAULT_LAUNCH_DELAY_SECS);
    validate_delay(path, "launcher.launch_delay_secs", launch_delay_secs)?;

    let password_cancel_exit = match launcher_raw.password_cancel_exit.as_deref() {
        None => defaults.password_cancel_exit,
        Some(value) => parse_cancel_exit(path, value)?,
    };

    Ok(LauncherSection {
        shell,
        credential_delay: Duration::from_secs(credential_delay_secs),
        launch_delay: Duration::from_secs(launch_delay_secs),
        password_cancel_exit,
    })
}

fn validate_delay(path: &Path, field: &'static str, secs: u64) -> Result<(), ConfigError> {
    if secs <= MAX_DELAY_SECS {
        return Ok(());
    }
    Err(ConfigError::invalid(
        path,
        field,
        format!("Use a delay of at most {MAX_DELAY_SECS} seconds"),
    ))
}

fn parse_cancel_exit(path: &Path, value: &str) -> Result<PasswordCancelExit, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "success" | "0" => Ok(PasswordCancelExit::Success),
        "failure" | "1" => Ok(PasswordCancelExit::Failure),
        other => Err(ConfigError::invalid(
            path,
            "launcher.password_cancel_exit",
            format!("expected `success` or `failure`, got `{other}`"),
        )),
    }
}
