//! Entry point for the remote desktop launcher.
use std::process::ExitCode;

use clap::Parser;
use mstsc_launcher::{
    cli::LaunchArgs,
    config::LauncherConfig,
    lib::telemetry::{self, RunSpan},
    workflow::{self, LaunchExit},
};
use tracing::{debug, Instrument};

const APP_NAME: &str = "mstsc-launcher";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), LaunchExit> {
    let args = match LaunchArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // help and version are not failures
            let status = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return Err(LaunchExit::silent(status));
        }
    };
    let profile = args.into_profile().map_err(LaunchExit::from_error)?;
    telemetry::init_tracing(&profile.log).map_err(LaunchExit::from_error)?;

    let run = RunSpan::start(APP_NAME);
    debug!(
        target: "mstsc_launcher::run",
        args = ?profile.launch_args,
        "Launch profile resolved"
    );

    let result = launch(&profile.config_path)
        .instrument(run.span().clone())
        .await;
    run.finish(match &result {
        Ok(()) => "completed",
        Err(exit) if exit.status() == 0 => "cancelled",
        Err(_) => "failed",
    });
    result
}

async fn launch(config_path: &std::path::Path) -> Result<(), LaunchExit> {
    let config =
        LauncherConfig::load_from_path(config_path.to_path_buf()).map_err(LaunchExit::from_error)?;
    workflow::run_launcher(&config).await?;
    Ok(())
}
