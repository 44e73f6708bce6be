use std::process::ExitCode;

use anyhow::Error;

use crate::{config::PasswordCancelExit, lib::errors::PromptError};

use super::session::SessionAborted;

/// Why the workflow stopped before the session finished.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowExit {
    #[error("host selection failed")]
    HostPrompt(#[source] PromptError),
    #[error("user selection failed")]
    UserPrompt(#[source] PromptError),
    /// Operator left the password prompt without answering.
    #[error("password prompt cancelled")]
    PasswordCancelled(#[source] PromptError),
    #[error(transparent)]
    SessionAborted(#[from] SessionAborted),
}

impl WorkflowExit {
    /// Process exit status for this outcome.
    pub fn status(&self, password_cancel: PasswordCancelExit) -> u8 {
        match self {
            WorkflowExit::PasswordCancelled(_) => password_cancel.status(),
            WorkflowExit::HostPrompt(_)
            | WorkflowExit::UserPrompt(_)
            | WorkflowExit::SessionAborted(_) => 1,
        }
    }
}

/// Terminal outcome of the binary: what to print and the status to exit with.
#[derive(Debug)]
pub struct LaunchExit {
    message: Option<String>,
    status: u8,
}

impl LaunchExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: Some(format!("{err:#}")),
            status: 1,
        }
    }

    pub fn from_workflow(exit: WorkflowExit, password_cancel: PasswordCancelExit) -> Self {
        let status = exit.status(password_cancel);
        Self {
            // a clean cancel stays quiet on stderr
            message: (status != 0).then(|| format!("{:#}", Error::new(exit))),
            status,
        }
    }

    /// Exit without printing anything further.
    pub fn silent(status: u8) -> Self {
        Self {
            message: None,
            status,
        }
    }

    pub fn status(&self) -> u8 {
        self.status
    }

    pub fn report(self) -> ExitCode {
        if let Some(message) = &self.message {
            eprintln!("{message}");
        }
        ExitCode::from(self.status)
    }
}
