use tracing::debug;

use crate::{config::Host, lib::errors::PromptError, prompt::Prompter};

/// Ask for a host and return its address.
pub fn select_host<P: Prompter>(hosts: &[Host], prompter: &mut P) -> Result<String, PromptError> {
    let index = prompter.select_host(hosts)?;
    let host = hosts
        .get(index)
        .ok_or(PromptError::UnknownChoice { label: "Host", index })?;

    debug!(
        target: "mstsc_launcher::workflow",
        name = %host.name,
        address = %host.address,
        "Host selected"
    );
    Ok(host.address.clone())
}
