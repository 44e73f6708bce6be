use tracing::{debug, info};

use super::{LauncherConfig, CONFIG_ENV_KEY};

pub fn log_source(path: &std::path::Path, explicit: bool) {
    if explicit {
        info!(
            target: "mstsc_launcher::config",
            path = %path.display(),
            "Loading configuration from explicit path"
        );
    } else {
        debug!(
            target: "mstsc_launcher::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            "No configuration path given; searching for config.* in the working directory"
        );
    }
}

pub fn log_loaded(config: &LauncherConfig) {
    info!(
        target: "mstsc_launcher::config",
        path = %config.source_path.display(),
        hosts = config.hosts.len(),
        users = config.users.len(),
        shell = %config.launcher.shell.program,
        credential_delay_secs = config.launcher.credential_delay.as_secs(),
        launch_delay_secs = config.launcher.launch_delay.as_secs(),
        password_cancel_exit = config.launcher.password_cancel_exit.as_str(),
        "Configuration file loaded successfully"
    );
}
