use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::{lib::errors::PromptError, prompt::Prompter};

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn validate_password(input: &str) -> Result<(), String> {
    if input.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must have at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

/// Keep a stored password, or ask for one when nothing is stored.
pub fn resolve_password<P: Prompter>(
    existing: SecretString,
    prompter: &mut P,
) -> Result<SecretString, PromptError> {
    if !existing.expose_secret().is_empty() {
        debug!(target: "mstsc_launcher::workflow", "Using stored password");
        return Ok(existing);
    }
    prompter.password(&validate_password)
}
