use std::{collections::VecDeque, path::PathBuf, time::Duration};

use mstsc_launcher::{
    config::{Host, LauncherConfig},
    lib::{
        errors::{CommandError, PromptError},
        shell::{CommandRunner, ShellCommand},
    },
    prompt::{Prompter, Validator},
    workflow::Pause,
};
use secrecy::SecretString;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_mstsc-launcher");

pub fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

pub fn load_fixture(relative: &str) -> LauncherConfig {
    LauncherConfig::load_from_path(fixture(relative)).expect("fixture config should load")
}

/// Prompter answering from a script instead of the terminal.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub host: Option<Result<&'static str, PromptError>>,
    pub login: Option<Result<&'static str, PromptError>>,
    /// Typed passwords in order; rejected ones are re-asked.
    pub passwords: VecDeque<&'static str>,
    pub password_cancel: bool,
    pub offered_logins: Vec<String>,
    pub password_prompts: usize,
    pub rejections: Vec<String>,
}

impl Prompter for ScriptedPrompter {
    fn select_host(&mut self, hosts: &[Host]) -> Result<usize, PromptError> {
        let name = self.host.take().expect("host answer scripted")?;
        Ok(hosts
            .iter()
            .position(|host| host.name == name)
            .expect("scripted host is configured"))
    }

    fn select_login(&mut self, logins: &[String]) -> Result<String, PromptError> {
        self.offered_logins = logins.to_vec();
        self.login
            .take()
            .expect("login answer scripted")
            .map(String::from)
    }

    fn password(&mut self, validate: Validator<'_>) -> Result<SecretString, PromptError> {
        self.password_prompts += 1;
        while let Some(typed) = self.passwords.pop_front() {
            match validate(typed) {
                Ok(()) => return Ok(SecretString::from(typed.to_string())),
                Err(message) => self.rejections.push(message),
            }
        }
        if self.password_cancel {
            return Err(PromptError::Interrupted);
        }
        panic!("password prompt ran out of scripted input");
    }
}

/// Records command lines and fails the ones listed in `failing`.
#[derive(Default)]
pub struct RecordingRunner {
    pub lines: Vec<String>,
    pub displays: Vec<String>,
    pub failing: Vec<usize>,
}

impl CommandRunner for RecordingRunner {
    async fn run(&mut self, command: &ShellCommand) -> Result<(), CommandError> {
        let index = self.lines.len();
        self.lines.push(command.line().to_string());
        self.displays.push(command.display().to_string());
        if self.failing.contains(&index) {
            return Err(CommandError::ExitStatus {
                exit_code: Some(1),
                message: "simulated failure".into(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPause {
    pub waits: Vec<Duration>,
}

impl Pause for RecordingPause {
    async fn pause(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}
