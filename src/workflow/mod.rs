//! Host, user, password, then the credential session.

use tracing::error;

use crate::{
    config::LauncherConfig,
    lib::shell::{CommandRunner, ShellRunner},
    prompt::{Prompter, TerminalPrompter},
};

pub mod exit;
pub mod host;
pub mod password;
pub mod session;
pub mod user;

pub use exit::{LaunchExit, WorkflowExit};
pub use host::select_host;
pub use password::{resolve_password, validate_password, MIN_PASSWORD_LEN};
pub use session::{
    run_session, Pause, SessionReport, SessionRequest, SessionState, SessionStep, StepPolicy,
    TokioPause,
};
pub use user::{build_logins, login_for, password_for_login, select_user, OperatorAccount};

/// Inputs shared by every step of one run.
#[derive(Debug)]
pub struct WorkflowContext<'a> {
    pub config: &'a LauncherConfig,
    pub operator: OperatorAccount,
}

/// Ask the three questions, then run the session.
pub async fn run_workflow<P, R, S>(
    ctx: &WorkflowContext<'_>,
    prompter: &mut P,
    runner: &mut R,
    pause: &mut S,
) -> Result<SessionReport, WorkflowExit>
where
    P: Prompter,
    R: CommandRunner,
    S: Pause,
{
    let address = select_host(&ctx.config.hosts, prompter).map_err(|err| {
        log_prompt_failure("host", &err);
        WorkflowExit::HostPrompt(err)
    })?;

    let choice = select_user(&ctx.config.users, &ctx.operator, prompter).map_err(|err| {
        log_prompt_failure("user", &err);
        WorkflowExit::UserPrompt(err)
    })?;

    let password = resolve_password(choice.password, prompter).map_err(|err| {
        log_prompt_failure("password", &err);
        WorkflowExit::PasswordCancelled(err)
    })?;

    let request = SessionRequest {
        address,
        login: choice.login,
        password,
    };
    Ok(run_session(&request, &ctx.config.launcher, runner, pause).await?)
}

fn log_prompt_failure(prompt: &'static str, err: &crate::lib::errors::PromptError) {
    error!(
        target: "mstsc_launcher::workflow",
        prompt,
        reason = %err,
        "Prompt failed"
    );
}

/// Run the workflow against the real terminal and shell.
pub async fn run_launcher(config: &LauncherConfig) -> Result<SessionReport, LaunchExit> {
    let ctx = WorkflowContext {
        config,
        operator: OperatorAccount::resolve(),
    };
    let mut prompter = TerminalPrompter;
    let mut runner = ShellRunner::new(config.launcher.shell.clone());
    let mut pause = TokioPause;

    run_workflow(&ctx, &mut prompter, &mut runner, &mut pause)
        .await
        .map_err(|exit| LaunchExit::from_workflow(exit, config.launcher.password_cancel_exit))
}
