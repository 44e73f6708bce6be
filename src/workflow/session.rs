//! Credential cache, remote desktop client, cache cleanup.
//!
//! Every step runs even when an earlier one failed; the outcome of each step
//! is collected in a [`SessionReport`].

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::{
    config::LauncherSection,
    lib::{
        errors::CommandError,
        shell::{CommandRunner, ShellCommand, REDACTED},
    },
};

/// Waits between steps.
#[allow(async_fn_in_trait)]
pub trait Pause {
    async fn pause(&mut self, duration: Duration);
}

/// [`Pause`] backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPause;

impl Pause for TokioPause {
    async fn pause(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Where the session is between commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Start,
    Cached,
    Launched,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    CacheCredential,
    LaunchClient,
    DeleteCredential,
}

impl SessionStep {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SessionStep::CacheCredential => "cache_credential",
            SessionStep::LaunchClient => "launch_client",
            SessionStep::DeleteCredential => "delete_credential",
        }
    }

    /// State reached once this step has run.
    const fn next_state(&self) -> SessionState {
        match self {
            SessionStep::CacheCredential => SessionState::Cached,
            SessionStep::LaunchClient => SessionState::Launched,
            SessionStep::DeleteCredential => SessionState::End,
        }
    }
}

/// What a failed command means for the rest of the session.
///
/// Every step in [`run_session`] is currently `BestEffort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// Log the failure and carry on.
    BestEffort,
    /// Stop the session at the failure.
    Required,
}

/// A step stopped the session.
#[derive(Debug, thiserror::Error)]
#[error("session step `{}` failed", .step.as_str())]
pub struct SessionAborted {
    pub step: SessionStep,
    #[source]
    pub source: CommandError,
    pub report: SessionReport,
}

#[derive(Debug)]
pub struct StepOutcome {
    pub step: SessionStep,
    pub policy: StepPolicy,
    pub error: Option<CommandError>,
}

impl StepOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-step results of one session.
#[derive(Debug)]
pub struct SessionReport {
    pub address: String,
    pub state: SessionState,
    pub steps: Vec<StepOutcome>,
}

impl SessionReport {
    fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            state: SessionState::Start,
            steps: Vec::with_capacity(3),
        }
    }

    pub fn failed_steps(&self) -> usize {
        self.steps.iter().filter(|outcome| !outcome.succeeded()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_steps() == 0
    }
}

/// Target name of the credential cache entry for `address`.
pub fn credential_target(address: &str) -> String {
    format!("TERMSRV/{address}")
}

pub fn cache_credential_command(address: &str, login: &str, password: &SecretString) -> ShellCommand {
    let target = credential_target(address);
    ShellCommand::with_display(
        format!(
            "cmdkey /generic:{target} /user:{login} /pass:{}",
            password.expose_secret()
        ),
        format!("cmdkey /generic:{target} /user:{login} /pass:{REDACTED}"),
    )
}

pub fn launch_client_command(address: &str) -> ShellCommand {
    ShellCommand::new(format!("start mstsc /f /v:{address}"))
}

pub fn delete_credential_command(address: &str) -> ShellCommand {
    ShellCommand::new(format!("cmdkey /delete:{}", credential_target(address)))
}

/// Everything the session needs from the prompts.
#[derive(Debug)]
pub struct SessionRequest {
    pub address: String,
    pub login: String,
    pub password: SecretString,
}

/// Cache the credential, start the client, then drop the credential again.
pub async fn run_session<R, S>(
    request: &SessionRequest,
    launcher: &LauncherSection,
    runner: &mut R,
    pause: &mut S,
) -> Result<SessionReport, SessionAborted>
where
    R: CommandRunner,
    S: Pause,
{
    let mut report = SessionReport::new(&request.address);

    let command = cache_credential_command(&request.address, &request.login, &request.password);
    let result = runner.run(&command).await;
    report = settle(report, SessionStep::CacheCredential, StepPolicy::BestEffort, result)?;
    pause.pause(launcher.credential_delay).await;

    let command = launch_client_command(&request.address);
    let result = runner.run(&command).await;
    report = settle(report, SessionStep::LaunchClient, StepPolicy::BestEffort, result)?;
    pause.pause(launcher.launch_delay).await;

    let command = delete_credential_command(&request.address);
    let result = runner.run(&command).await;
    report = settle(report, SessionStep::DeleteCredential, StepPolicy::BestEffort, result)?;

    info!(
        target: "mstsc_launcher::session",
        address = %report.address,
        failed_steps = report.failed_steps(),
        "Remote desktop session handed off"
    );
    Ok(report)
}

/// Record one step's result and apply `policy` to a failure.
fn settle(
    mut report: SessionReport,
    step: SessionStep,
    policy: StepPolicy,
    result: Result<(), CommandError>,
) -> Result<SessionReport, SessionAborted> {
    match result {
        Ok(()) => {
            report.state = step.next_state();
            debug!(
                target: "mstsc_launcher::session",
                step = step.as_str(),
                state = ?report.state,
                "Session step completed"
            );
            report.steps.push(StepOutcome {
                step,
                policy,
                error: None,
            });
            Ok(report)
        }
        Err(source) => match policy {
            StepPolicy::BestEffort => {
                warn!(
                    target: "mstsc_launcher::session",
                    step = step.as_str(),
                    reason = %source,
                    "Session step failed; continuing"
                );
                report.state = step.next_state();
                report.steps.push(StepOutcome {
                    step,
                    policy,
                    error: Some(source),
                });
                Ok(report)
            }
            StepPolicy::Required => {
                warn!(
                    target: "mstsc_launcher::session",
                    step = step.as_str(),
                    reason = %source,
                    "Session step failed; stopping"
                );
                Err(SessionAborted {
                    step,
                    source,
                    report,
                })
            }
        },
    }
}
