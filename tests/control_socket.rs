// tests/control_socket.rs

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::sync::mpsc;

use buzzerd::control::{self, send_request};
use buzzerd::engine::{CoreRuntime, ExecOutcome, ExecRequest, Runtime, RuntimeOptions};
use buzzerd::errors::{exit_code, BuzzerError};
use buzzerd::hw::SimulatedBoard;
use buzzerd::types::{LedMode, LineLevel};
use buzzerd_test_utils::builders::DaemonConfigBuilder;
use buzzerd_test_utils::fake_supervisor::{FakeBehaviour, FakeSupervisor};
use buzzerd_test_utils::{init_tracing, wait_for, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn socket_round_trip_drives_the_daemon() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let socket = dir.path().join("BuzzerD.sock");

    let board = SimulatedBoard::new();
    let launched: Arc<Mutex<Vec<ExecRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let (tx, rx) = mpsc::channel(16);

    let listener = control::bind(&socket)?;
    let listener_handle = control::spawn_listener(listener, tx.clone());

    let supervisor = FakeSupervisor::new(
        tx.clone(),
        Arc::clone(&launched),
        FakeBehaviour::Complete(ExecOutcome::Success),
    );
    let runtime = Runtime::new(
        CoreRuntime::new(&DaemonConfigBuilder::new("/bin/true").led(LedMode::Success).build()),
        rx,
        supervisor,
        board.lines(),
        RuntimeOptions { tick_period: Duration::from_millis(5) },
    );
    let handle = tokio::spawn(runtime.run());

    assert!(control::is_daemon_running(&socket).await);

    let reply = with_timeout(send_request(&socket, "-x /tmp/new.sh")).await?;
    assert_eq!(reply, "Updated executable.");

    let reply = with_timeout(send_request(&socket, "-l bogus")).await?;
    assert_eq!(reply, "ERR: Unable to parse LED parameter!");

    let reply = with_timeout(send_request(&socket, "hello")).await?;
    assert_eq!(reply, "Unable to parse command!");

    board.tap();
    wait_for(|| board.led_level() == LineLevel::High).await;
    assert_eq!(launched.lock().unwrap()[0].executable, "/tmp/new.sh");

    let reply = with_timeout(send_request(&socket, "-q")).await?;
    assert_eq!(reply, "Received quit.");

    let core = with_timeout(handle).await??;
    listener_handle.shutdown(Duration::from_secs(1)).await;
    control::remove_socket(&socket);

    assert!(!core.state().running);
    assert_eq!(core.state().led_mode, LedMode::Success);
    assert!(!socket.exists());
    Ok(())
}

#[tokio::test]
async fn connection_without_request_gets_no_reply() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let socket = dir.path().join("ctl.sock");
    let (tx, mut rx) = mpsc::channel(4);
    let listener_handle = control::spawn_listener(control::bind(&socket)?, tx);

    let mut stream = UnixStream::connect(&socket).await?;
    stream.shutdown().await?;
    let mut reply = String::new();
    with_timeout(stream.read_to_string(&mut reply)).await?;

    assert!(reply.is_empty());
    assert!(rx.try_recv().is_err());

    listener_handle.shutdown(Duration::from_secs(1)).await;
    Ok(())
}

#[tokio::test]
async fn bind_replaces_stale_socket_file() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let socket = dir.path().join("stale.sock");
    std::fs::write(&socket, b"")?;

    assert!(!control::is_daemon_running(&socket).await);
    let _listener = control::bind(&socket)?;
    assert!(control::is_daemon_running(&socket).await);
    Ok(())
}

#[tokio::test]
async fn unreachable_daemon_maps_to_exit_code() -> TestResult {
    let dir = TempDir::new()?;
    let socket = dir.path().join("nobody.sock");

    let err = send_request(&socket, "-q").await.unwrap_err();

    assert!(matches!(err, BuzzerError::DaemonUnreachable(_)));
    assert_eq!(err.exit_code(), exit_code::UNREACHABLE);
    Ok(())
}
