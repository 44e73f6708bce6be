use std::{
    fs,
    process::{Command, Output, Stdio},
};

use mstsc_launcher::cli::CONFIG_ENV_KEY;
use tempfile::tempdir;

use crate::common::{fixture, BINARY_PATH};

fn launcher(args: &[&str]) -> Output {
    Command::new(BINARY_PATH)
        .args(args)
        .env_remove(CONFIG_ENV_KEY)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("process should start")
}

#[test]
fn help_exits_successfully() {
    let output = launcher(&["--help"]);

    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--out", "--logfile", "--level", "--config"] {
        assert!(stdout.contains(flag), "help should mention {flag}: {stdout}");
    }
}

#[test]
fn unknown_level_exits_with_failure() {
    let output = launcher(&["--level", "loud", "--out", "stderr"]);

    assert_eq!(output.status.code(), Some(1), "{output:?}");
}

#[test]
fn missing_config_exits_with_failure() {
    let temp = tempdir().expect("can create temporary directory");
    let missing = temp.path().join("absent.toml");

    let output = launcher(&[
        "--out",
        "stderr",
        "--config",
        missing.to_str().expect("temp path is UTF-8"),
    ]);

    assert_eq!(output.status.code(), Some(1), "{output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to read configuration file"),
        "stderr should name the failure: {stderr}"
    );
}

#[test]
fn non_list_host_section_exits_with_failure() {
    let config = fixture("tests/fixtures/config_host_not_list.toml");

    let output = launcher(&[
        "--out",
        "stderr",
        "--config",
        config.to_str().expect("fixture path is UTF-8"),
    ]);

    assert_eq!(output.status.code(), Some(1), "{output:?}");
}

#[test]
fn non_interactive_stdin_fails_host_prompt_without_commands() {
    let config = fixture("tests/fixtures/config_valid.toml");

    let output = launcher(&[
        "--out",
        "stderr",
        "--level",
        "debug",
        "--config",
        config.to_str().expect("fixture path is UTF-8"),
    ]);

    assert_eq!(output.status.code(), Some(1), "{output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("host selection failed"), "{stderr}");
    assert!(!stderr.contains("Executing command"), "{stderr}");
}

#[test]
fn unopenable_log_file_exits_with_failure() {
    let temp = tempdir().expect("can create temporary directory");
    let logfile = temp.path().join("missing-dir").join("output.log");

    let output = launcher(&[
        "--logfile",
        logfile.to_str().expect("temp path is UTF-8"),
    ]);

    assert_eq!(output.status.code(), Some(1), "{output:?}");
    assert!(!logfile.exists());
}

#[test]
fn file_output_appends_run_events() {
    let temp = tempdir().expect("can create temporary directory");
    let logfile = temp.path().join("output.log");
    let missing = temp.path().join("absent.toml");
    let args = [
        "--logfile",
        logfile.to_str().expect("temp path is UTF-8"),
        "--config",
        missing.to_str().expect("temp path is UTF-8"),
    ];

    launcher(&args);
    launcher(&args);

    let log = fs::read_to_string(&logfile).expect("log file should exist");
    assert_eq!(log.matches("Start mstsc-launcher app").count(), 2, "{log}");
    assert!(log.contains("Failed to read configuration file"), "{log}");
    assert!(!log.contains("\u{1b}["), "file output has no ANSI escapes");
}
