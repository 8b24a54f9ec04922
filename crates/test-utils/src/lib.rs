//! Shared helpers for the `pipexec` integration tests.

pub mod builders;
pub mod fake_runner;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route `tracing` output into the test harness's captured output.
///
/// Only failing tests show it (or every test with `-- --nocapture`).
/// `RUST_LOG` picks the filter; the default shows pipexec's own debug
/// events, which include each stage as it starts and exits.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,pipexec=debug"));

        // Another harness may already have installed a subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
