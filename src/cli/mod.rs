//! Command-line surface: flags, launch profile, and log settings.

pub mod args;
pub mod profile;

pub use args::LaunchArgs;
pub use profile::{
    build_launch_args, resolve_config_path, LaunchProfile, LogLevel, LogOutput, CONFIG_ENV_KEY,
    DEFAULT_LOGFILE,
};
