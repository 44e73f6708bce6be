use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

use crate::lib::errors::ConfigError;

/// Config value of `Username` that stands for the account running the launcher.
pub const CURRENT_OPERATOR_SENTINEL: &str = "USERNAME";
/// Config value of `Password` meaning no password is stored.
pub const ABSENT_PASSWORD_SENTINEL: &str = "NA";

/// Who to log in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameSpec {
    Literal(String),
    CurrentOperatorAccount,
}

/// Stored password, if any.
#[derive(Debug)]
pub enum PasswordSpec {
    Literal(SecretString),
    Absent,
}

impl PasswordSpec {
    pub fn is_absent(&self) -> bool {
        matches!(self, PasswordSpec::Absent)
    }
}

/// A configured login.
#[derive(Debug)]
pub struct UserEntry {
    pub domain: String,
    pub username: UsernameSpec,
    pub password: PasswordSpec,
}

#[derive(Debug, Deserialize)]
pub struct RawUser {
    #[serde(rename = "Domain", alias = "domain")]
    pub domain: Option<String>,
    #[serde(rename = "Username", alias = "username")]
    pub username: Option<String>,
    #[serde(rename = "Password", alias = "password")]
    pub password: Option<String>,
}

/// Validate the `user` list and decode its sentinels.
pub fn parse_user_section(
    raw: Option<Vec<RawUser>>,
    path: &Path,
) -> Result<Vec<UserEntry>, ConfigError> {
    let raw_users = raw.ok_or_else(|| ConfigError::missing(path, "user"))?;

    raw_users
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let domain = raw
                .domain
                .ok_or_else(|| ConfigError::missing(path, format!("user[{index}].Domain")))?;
            let username = raw
                .username
                .ok_or_else(|| ConfigError::missing(path, format!("user[{index}].Username")))?;
            if username.trim().is_empty() {
                return Err(ConfigError::invalid(
                    path,
                    format!("user[{index}].Username"),
                    "must not be empty",
                ));
            }

            Ok(UserEntry {
                domain: domain.trim().to_string(),
                username: decode_username(username.trim()),
                password: decode_password(raw.password),
            })
        })
        .collect()
}

fn decode_username(value: &str) -> UsernameSpec {
    if value == CURRENT_OPERATOR_SENTINEL {
        UsernameSpec::CurrentOperatorAccount
    } else {
        UsernameSpec::Literal(value.to_string())
    }
}

fn decode_password(value: Option<String>) -> PasswordSpec {
    match value {
        Some(password) if !password.is_empty() && password != ABSENT_PASSWORD_SENTINEL => {
            PasswordSpec::Literal(SecretString::from(password))
        }
        _ => PasswordSpec::Absent,
    }
}
