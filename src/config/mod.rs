//! Load and validate the launcher configuration.
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod hosts;
pub mod launcher;
pub mod telemetry;
pub mod users;

pub use crate::cli::CONFIG_ENV_KEY;
pub use hosts::{parse_host_section, Host, RawHost};
pub use launcher::{
    parse_launcher_section, LauncherSection, PasswordCancelExit, RawLauncherSection,
    DEFAULT_CREDENTIAL_DELAY_SECS, DEFAULT_LAUNCH_DELAY_SECS,
};
pub use users::{
    parse_user_section, PasswordSpec, RawUser, UserEntry, UsernameSpec,
    ABSENT_PASSWORD_SENTINEL, CURRENT_OPERATOR_SENTINEL,
};

/// Top-level configuration container.
#[derive(Debug)]
pub struct LauncherConfig {
    pub hosts: Vec<Host>,
    pub users: Vec<UserEntry>,
    pub launcher: LauncherSection,
    pub source_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawLauncherConfig {
    host: Option<Vec<RawHost>>,
    user: Option<Vec<RawUser>>,
    launcher: Option<RawLauncherSection>,
}

impl LauncherConfig {
    /// Load configuration from `path`.
    ///
    /// A path without an extension is treated as a stem and every format the
    /// `config` crate understands is tried (`config.toml`, `config.yaml`, ...).
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        telemetry::log_source(&path, path.extension().is_some());
        info!(
            target: "mstsc_launcher::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder()
            .add_source(config::File::with_name(&path.to_string_lossy()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "mstsc_launcher::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawLauncherConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "mstsc_launcher::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "mstsc_launcher::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawLauncherConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let hosts = parse_host_section(raw.host, &path)?;
        let users = parse_user_section(raw.user, &path)?;
        let launcher = parse_launcher_section(raw.launcher, &path)?;

        Ok(Self {
            hosts,
            users,
            launcher,
            source_path: path,
        })
    }
}
