use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::{
    config::{PasswordSpec, UserEntry, UsernameSpec},
    lib::errors::PromptError,
    prompt::Prompter,
};

/// Environment variable consulted first for the operator's account name.
pub const OPERATOR_ENV_KEY: &str = "USERNAME";

/// Account name of whoever runs the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorAccount(String);

impl OperatorAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// `USERNAME` from the environment when set, the OS account otherwise.
    pub fn resolve() -> Self {
        match std::env::var(OPERATOR_ENV_KEY) {
            Ok(name) if !name.trim().is_empty() => Self(name),
            _ => Self(whoami::username()),
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Login string offered for `entry`: `Domain\Username`.
pub fn login_for(entry: &UserEntry, operator: &OperatorAccount) -> String {
    let username = match &entry.username {
        UsernameSpec::Literal(name) => name.as_str(),
        UsernameSpec::CurrentOperatorAccount => operator.name(),
    };
    format!("{}\\{}", entry.domain, username)
}

pub fn build_logins(users: &[UserEntry], operator: &OperatorAccount) -> Vec<String> {
    users.iter().map(|entry| login_for(entry, operator)).collect()
}

/// Stored password of the first entry whose login equals `login`.
///
/// Empty when no entry matches or the match has no stored password.
pub fn password_for_login(
    users: &[UserEntry],
    operator: &OperatorAccount,
    login: &str,
) -> SecretString {
    let stored = users
        .iter()
        .find(|entry| login_for(entry, operator) == login)
        .map(|entry| &entry.password);
    match stored {
        Some(PasswordSpec::Literal(secret)) => {
            SecretString::from(secret.expose_secret().to_string())
        }
        Some(PasswordSpec::Absent) | None => SecretString::from(String::new()),
    }
}

/// Login picked by the operator and the password stored for it.
#[derive(Debug)]
pub struct UserChoice {
    pub login: String,
    pub password: SecretString,
}

pub fn select_user<P: Prompter>(
    users: &[UserEntry],
    operator: &OperatorAccount,
    prompter: &mut P,
) -> Result<UserChoice, PromptError> {
    let logins = build_logins(users, operator);
    let login = prompter.select_login(&logins)?;
    let password = password_for_login(users, operator, &login);

    debug!(
        target: "mstsc_launcher::workflow",
        login = %login,
        stored_password = !password.expose_secret().is_empty(),
        "User selected"
    );
    Ok(UserChoice { login, password })
}
