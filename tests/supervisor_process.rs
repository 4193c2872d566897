// tests/supervisor_process.rs

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;

use buzzerd::engine::{
    CoreRuntime, ExecOutcome, ExecRequest, Runtime, RuntimeEvent, RuntimeOptions,
};
use buzzerd::exec::{RealSupervisor, Supervisor};
use buzzerd::hw::SimulatedBoard;
use buzzerd::types::{LedMode, LineLevel};
use buzzerd_test_utils::builders::DaemonConfigBuilder;
use buzzerd_test_utils::{init_tracing, wait_for, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn request(executable: &str, arguments: &str, log_path: Option<PathBuf>) -> ExecRequest {
    ExecRequest {
        executable: executable.to_string(),
        arguments: arguments.to_string(),
        log_path,
        inherit_stdio: false,
    }
}

async fn run_once(req: ExecRequest) -> Result<ExecOutcome, Box<dyn Error>> {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(4);
    let mut supervisor = RealSupervisor::new(tx);
    supervisor.launch(req).await?;

    match with_timeout(rx.recv()).await {
        Some(RuntimeEvent::ExecutionFinished { pid, outcome }) => {
            assert!(pid.is_some());
            Ok(outcome)
        }
        other => Err(format!("unexpected event: {other:?}").into()),
    }
}

#[tokio::test]
async fn true_reports_success() -> TestResult {
    assert_eq!(run_once(request("/bin/true", "", None)).await?, ExecOutcome::Success);
    Ok(())
}

#[tokio::test]
async fn false_reports_failure() -> TestResult {
    assert_eq!(run_once(request("/bin/false", "", None)).await?, ExecOutcome::Failed(1));
    Ok(())
}

#[tokio::test]
async fn exit_code_is_preserved() -> TestResult {
    assert_eq!(run_once(request("exit", "3", None)).await?, ExecOutcome::Failed(3));
    Ok(())
}

#[tokio::test]
async fn client_log_gets_output_and_trailer() -> TestResult {
    let dir = TempDir::new()?;
    let log = dir.path().join("client.log");

    let outcome = run_once(request("echo", "hello buzzer", Some(log.clone()))).await?;
    assert_eq!(outcome, ExecOutcome::Success);

    let outcome = run_once(request("echo oops >&2; exit", "7", Some(log.clone()))).await?;
    assert_eq!(outcome, ExecOutcome::Failed(7));

    assert_eq!(
        fs::read_to_string(&log)?,
        "hello buzzer\nExit code: 0\noops\nExit code: 7\n"
    );
    Ok(())
}

#[tokio::test]
async fn unopenable_client_log_fails_the_launch() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let log = dir.path().join("missing-dir").join("client.log");

    let (tx, mut rx) = mpsc::channel(4);
    let mut supervisor = RealSupervisor::new(tx);

    assert!(supervisor.launch(request("/bin/true", "", Some(log))).await.is_err());
    assert!(rx.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn end_to_end_press_runs_real_process_once() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let log = dir.path().join("client.log");

    let board = SimulatedBoard::new();
    let (tx, rx) = mpsc::channel(16);
    let config = DaemonConfigBuilder::new("/bin/true")
        .led(LedMode::Success)
        .log_path(&log)
        .build();
    let runtime = Runtime::new(
        CoreRuntime::new(&config),
        rx,
        RealSupervisor::new(tx.clone()),
        board.lines(),
        RuntimeOptions { tick_period: Duration::from_millis(5) },
    );
    let handle = tokio::spawn(runtime.run());

    // Three consecutive pressed samples are one press.
    board.tap();
    board.tap();
    board.tap();

    wait_for(|| board.led_level() == LineLevel::High).await;

    tx.send(RuntimeEvent::ShutdownRequested).await?;
    let core = with_timeout(handle).await??;

    assert!(core.state().last_exit_succeeded);
    assert_eq!(core.state().pending_triggers, 0);
    assert!(!core.state().execution_in_flight);
    assert_eq!(fs::read_to_string(&log)?, "Exit code: 0\n");
    Ok(())
}
