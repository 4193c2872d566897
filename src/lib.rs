// src/lib.rs

pub mod cli;
pub mod config;
pub mod control;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod hw;
pub mod logging;
pub mod types;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, DaemonConfig};
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent, RuntimeOptions};
use crate::errors::{BuzzerError, Result};
use crate::exec::RealSupervisor;
use crate::hw::SimulatedBoard;

/// High-level entry point used by `main.rs`.
///
/// With request words this is the one-shot client. Otherwise it wires
/// together:
/// - config loading
/// - single-instance check and control socket
/// - GPIO lines (real or simulated)
/// - core / runtime / supervisor
/// - termination signal handling
pub async fn run(args: CliArgs) -> Result<()> {
    if !args.request.is_empty() {
        return control::run_client(&args.socket, &args.request).await;
    }

    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg, &args);
        return Ok(());
    }

    run_daemon(&args, &cfg).await
}

async fn run_daemon(args: &CliArgs, cfg: &DaemonConfig) -> Result<()> {
    if control::is_daemon_running(&args.socket).await {
        return Err(BuzzerError::AlreadyRunning(args.socket.clone()));
    }

    let lines = if args.simulate {
        warn!("using simulated GPIO lines; the button will never be pressed");
        SimulatedBoard::new().lines()
    } else {
        hw::open_gpio(cfg)?
    };

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    spawn_signal_listener(rt_tx.clone())?;

    let listener = control::bind(&args.socket)?;
    let listener = control::spawn_listener(listener, rt_tx.clone());

    let supervisor = RealSupervisor::new(rt_tx);
    let core = CoreRuntime::new(cfg);
    let runtime = Runtime::new(core, rt_rx, supervisor, lines, RuntimeOptions::default());

    info!(
        executable = %cfg.executable,
        led = %cfg.led_mode,
        debug = cfg.debug,
        "successfully initialized"
    );

    let result = runtime.run().await;

    // Replies already handed to connection tasks (the `-q` reply included)
    // must be written before the process exits.
    listener.shutdown(control::SHUTDOWN_GRACE).await;
    control::remove_socket(&args.socket);

    let core = result?;
    info!(pending = core.state().pending_triggers, "buzzerd stopped");
    Ok(())
}

/// SIGINT / SIGTERM / SIGQUIT → graceful shutdown.
fn spawn_signal_listener(tx: mpsc::Sender<RuntimeEvent>) -> Result<()> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = interrupt.recv() => "SIGINT",
            _ = terminate.recv() => "SIGTERM",
            _ = quit.recv() => "SIGQUIT",
        };
        info!(signal = name, "termination signal received");
        if tx.send(RuntimeEvent::ShutdownRequested).await.is_err() {
            debug!(signal = name, "runtime already stopped; shutdown request dropped");
        }
    });

    Ok(())
}

/// Simple dry-run output: print the effective configuration.
fn print_dry_run(cfg: &DaemonConfig, args: &CliArgs) {
    println!("buzzerd dry-run");
    println!("  config: {}", args.config.display());
    println!("  socket: {}", args.socket.display());
    println!();
    println!("  executable: {}", cfg.executable);
    if !cfg.arguments.is_empty() {
        println!("  arguments: {}", cfg.arguments);
    }
    if let Some(ref path) = cfg.log_path {
        println!("  client output: {}", path.display());
    }
    println!("  led: {}", cfg.led_mode);
    println!("  button pin (BCM): {}", cfg.button_pin);
    println!("  led pin (BCM): {}", cfg.led_pin);
    if cfg.debug {
        println!("  debug: true");
    }
}
