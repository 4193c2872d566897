// tests/daemon_lifecycle.rs

//! Full daemon start/stop through `buzzerd::run`, each on its own Tokio
//! runtime that is dropped as soon as `run` returns, the way `main` does.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

use buzzerd::cli::CliArgs;
use buzzerd::control::{is_daemon_running, send_request};
use buzzerd_test_utils::builders::config_text;
use buzzerd_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn daemon_args(dir: &Path) -> std::io::Result<CliArgs> {
    let config = dir.join("buzzerd.conf");
    fs::write(
        &config,
        config_text(&[("Executable", "/bin/true"), ("Arguments", ""), ("LED", "on")]),
    )?;

    Ok(CliArgs {
        config,
        socket: dir.join("BuzzerD.sock"),
        log_level: None,
        simulate: true,
        dry_run: false,
        request: Vec::new(),
    })
}

/// Run the daemon on a dedicated thread and runtime.
fn spawn_daemon(args: CliArgs) -> thread::JoinHandle<Result<(), String>> {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| e.to_string())?;
        let result = runtime.block_on(buzzerd::run(args));
        drop(runtime);
        result.map_err(|e| e.to_string())
    })
}

async fn wait_for_socket(socket: &Path) {
    with_timeout(async {
        while !is_daemon_running(socket).await {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
}

#[test]
fn quit_reply_survives_daemon_shutdown() -> TestResult {
    init_tracing();
    let client = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    for round in 0..20 {
        let dir = TempDir::new()?;
        let args = daemon_args(dir.path())?;
        let socket = args.socket.clone();

        let daemon = spawn_daemon(args);

        let reply = client.block_on(async {
            wait_for_socket(&socket).await;
            with_timeout(send_request(&socket, "-q")).await
        })?;
        assert_eq!(reply, "Received quit.", "round {round}");

        let outcome = daemon.join().map_err(|_| "daemon thread panicked")?;
        assert_eq!(outcome, Ok(()), "round {round}");
        assert!(!socket.exists(), "round {round}: socket file left behind");
    }
    Ok(())
}

#[test]
fn second_daemon_on_same_socket_is_refused() -> TestResult {
    init_tracing();
    let client = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let dir = TempDir::new()?;
    let args = daemon_args(dir.path())?;
    let socket = args.socket.clone();

    let first = spawn_daemon(args.clone());
    client.block_on(wait_for_socket(&socket));

    let second = spawn_daemon(args).join().map_err(|_| "daemon thread panicked")?;
    let err = second.expect_err("second daemon must not start");
    assert!(err.contains("already running"), "{err}");

    let reply = client.block_on(with_timeout(send_request(&socket, "-q")))?;
    assert_eq!(reply, "Received quit.");
    assert_eq!(first.join().map_err(|_| "daemon thread panicked")?, Ok(()));
    Ok(())
}
