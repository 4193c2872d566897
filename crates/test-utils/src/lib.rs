//! Shared helpers for buzzerd's integration tests.

pub mod builders;
pub mod fake_supervisor;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

/// Upper bound for any single awaited test step.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

static TRACING: Once = Once::new();

/// Install a capture-friendly subscriber once per test binary.
///
/// Output only shows for failing tests (or with `--nocapture`); pick the
/// level with `RUST_LOG`, e.g. `RUST_LOG=buzzerd=debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Await `f`, panicking if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F: Future>(f: F) -> F::Output {
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(output) => output,
        Err(_) => panic!("test step timed out after {TEST_TIMEOUT:?}"),
    }
}

/// Poll `condition` every couple of milliseconds until it holds.
pub async fn wait_for(mut condition: impl FnMut() -> bool) {
    with_timeout(async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await;
}
