use std::time::Duration;

use mstsc_launcher::{
    config::PasswordCancelExit,
    lib::errors::PromptError,
    workflow::{run_workflow, OperatorAccount, SessionState, WorkflowContext, WorkflowExit},
};

use crate::common::{load_fixture, RecordingPause, RecordingRunner, ScriptedPrompter};

#[tokio::test]
async fn stored_password_runs_all_three_commands_without_prompting() {
    let config = load_fixture("tests/fixtures/config_valid.toml");
    let ctx = WorkflowContext {
        config: &config,
        operator: OperatorAccount::new("bob"),
    };
    let mut prompter = ScriptedPrompter {
        host: Some(Ok("srv1")),
        login: Some(Ok("CORP\\alice")),
        ..Default::default()
    };
    let mut runner = RecordingRunner::default();
    let mut pause = RecordingPause::default();

    let report = run_workflow(&ctx, &mut prompter, &mut runner, &mut pause)
        .await
        .expect("workflow should complete");

    assert_eq!(
        runner.lines,
        vec![
            "cmdkey /generic:TERMSRV/10.0.0.5 /user:CORP\\alice /pass:s3cret!",
            "start mstsc /f /v:10.0.0.5",
            "cmdkey /delete:TERMSRV/10.0.0.5",
        ]
    );
    assert_eq!(prompter.password_prompts, 0, "stored password skips the prompt");
    assert_eq!(
        pause.waits,
        vec![Duration::from_secs(2), Duration::from_secs(2)]
    );
    assert_eq!(report.state, SessionState::End);
    assert!(report.all_succeeded());
}

#[tokio::test]
async fn operator_sentinel_user_is_prompted_for_password() {
    let config = load_fixture("tests/fixtures/config_valid.toml");
    let ctx = WorkflowContext {
        config: &config,
        operator: OperatorAccount::new("bob"),
    };
    let mut prompter = ScriptedPrompter {
        host: Some(Ok("srv1")),
        login: Some(Ok("CORP\\bob")),
        passwords: ["abc", "abcdef"].into_iter().collect(),
        ..Default::default()
    };
    let mut runner = RecordingRunner::default();
    let mut pause = RecordingPause::default();

    run_workflow(&ctx, &mut prompter, &mut runner, &mut pause)
        .await
        .expect("workflow should complete");

    assert_eq!(prompter.offered_logins, vec!["CORP\\alice", "CORP\\bob"]);
    assert_eq!(
        prompter.rejections,
        vec![String::from("Password must have at least 6 characters")]
    );
    assert_eq!(
        runner.lines[0],
        "cmdkey /generic:TERMSRV/10.0.0.5 /user:CORP\\bob /pass:abcdef"
    );
    assert_eq!(
        runner.displays[0],
        "cmdkey /generic:TERMSRV/10.0.0.5 /user:CORP\\bob /pass:****"
    );
}

#[tokio::test]
async fn typed_login_outside_config_gets_password_prompt() {
    let config = load_fixture("tests/fixtures/config_valid.toml");
    let ctx = WorkflowContext {
        config: &config,
        operator: OperatorAccount::new("bob"),
    };
    let mut prompter = ScriptedPrompter {
        host: Some(Ok("File Server")),
        login: Some(Ok("LAB\\carol")),
        passwords: ["hunter22"].into_iter().collect(),
        ..Default::default()
    };
    let mut runner = RecordingRunner::default();
    let mut pause = RecordingPause::default();

    run_workflow(&ctx, &mut prompter, &mut runner, &mut pause)
        .await
        .expect("workflow should complete");

    assert_eq!(prompter.password_prompts, 1);
    assert_eq!(
        runner.lines[0],
        "cmdkey /generic:TERMSRV/fs01.corp.example /user:LAB\\carol /pass:hunter22"
    );
}

#[tokio::test]
async fn cancelled_host_prompt_runs_no_commands() {
    let config = load_fixture("tests/fixtures/config_valid.toml");
    let ctx = WorkflowContext {
        config: &config,
        operator: OperatorAccount::new("bob"),
    };
    let mut prompter = ScriptedPrompter {
        host: Some(Err(PromptError::Interrupted)),
        ..Default::default()
    };
    let mut runner = RecordingRunner::default();
    let mut pause = RecordingPause::default();

    let exit = run_workflow(&ctx, &mut prompter, &mut runner, &mut pause)
        .await
        .expect_err("cancel should stop the workflow");

    assert!(matches!(exit, WorkflowExit::HostPrompt(PromptError::Interrupted)));
    assert_eq!(exit.status(config.launcher.password_cancel_exit), 1);
    assert!(runner.lines.is_empty());
    assert!(pause.waits.is_empty());
}

#[tokio::test]
async fn cancelled_user_prompt_exits_with_failure() {
    let config = load_fixture("tests/fixtures/config_valid.toml");
    let ctx = WorkflowContext {
        config: &config,
        operator: OperatorAccount::new("bob"),
    };
    let mut prompter = ScriptedPrompter {
        host: Some(Ok("srv1")),
        login: Some(Err(PromptError::Eof)),
        ..Default::default()
    };
    let mut runner = RecordingRunner::default();
    let mut pause = RecordingPause::default();

    let exit = run_workflow(&ctx, &mut prompter, &mut runner, &mut pause)
        .await
        .expect_err("cancel should stop the workflow");

    assert!(matches!(exit, WorkflowExit::UserPrompt(PromptError::Eof)));
    assert_eq!(exit.status(PasswordCancelExit::Success), 1);
    assert!(runner.lines.is_empty());
}

#[tokio::test]
async fn cancelled_password_prompt_exits_cleanly_by_default() {
    let config = load_fixture("tests/fixtures/config_valid.toml");
    let ctx = WorkflowContext {
        config: &config,
        operator: OperatorAccount::new("bob"),
    };
    let mut prompter = ScriptedPrompter {
        host: Some(Ok("srv1")),
        login: Some(Ok("CORP\\bob")),
        password_cancel: true,
        ..Default::default()
    };
    let mut runner = RecordingRunner::default();
    let mut pause = RecordingPause::default();

    let exit = run_workflow(&ctx, &mut prompter, &mut runner, &mut pause)
        .await
        .expect_err("cancel should stop the workflow");

    assert!(matches!(exit, WorkflowExit::PasswordCancelled(_)));
    assert_eq!(exit.status(config.launcher.password_cancel_exit), 0);
    assert!(runner.lines.is_empty());
}

#[tokio::test]
async fn password_cancel_policy_comes_from_config() {
    let config = load_fixture("tests/fixtures/config_launcher.toml");
    assert_eq!(
        config.launcher.password_cancel_exit,
        PasswordCancelExit::Failure
    );
    let ctx = WorkflowContext {
        config: &config,
        operator: OperatorAccount::new("bob"),
    };
    let mut prompter = ScriptedPrompter {
        host: Some(Ok("srv1")),
        login: Some(Ok("LAB\\nobody")),
        password_cancel: true,
        ..Default::default()
    };
    let mut runner = RecordingRunner::default();
    let mut pause = RecordingPause::default();

    let exit = run_workflow(&ctx, &mut prompter, &mut runner, &mut pause)
        .await
        .expect_err("cancel should stop the workflow");

    assert_eq!(exit.status(config.launcher.password_cancel_exit), 1);
}

#[tokio::test]
async fn failing_commands_do_not_stop_the_session() {
    let config = load_fixture("tests/fixtures/config_valid.toml");
    let ctx = WorkflowContext {
        config: &config,
        operator: OperatorAccount::new("bob"),
    };
    let mut prompter = ScriptedPrompter {
        host: Some(Ok("srv1")),
        login: Some(Ok("CORP\\alice")),
        ..Default::default()
    };
    let mut runner = RecordingRunner {
        failing: vec![0, 1],
        ..Default::default()
    };
    let mut pause = RecordingPause::default();

    let report = run_workflow(&ctx, &mut prompter, &mut runner, &mut pause)
        .await
        .expect("best-effort steps never abort");

    assert_eq!(runner.lines.len(), 3);
    assert_eq!(runner.lines[2], "cmdkey /delete:TERMSRV/10.0.0.5");
    assert_eq!(report.failed_steps(), 2);
    assert_eq!(report.state, SessionState::End);
}
