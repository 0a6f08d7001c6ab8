//! Logging utilities.
//!
//! The solver emits `tracing` events under the `u_timetable` target:
//! `info` once per solve, `debug` on aborts and rejected input, `trace`
//! per backtrack. These helpers install a `tracing-subscriber` formatter;
//! they are no-ops unless the `logging` feature is enabled.
//!
//! Installing a subscriber twice is harmless: later calls leave the first
//! one in place.

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, EnvFilter};

/// `RUST_LOG` if set, `fallback` otherwise.
#[cfg(feature = "logging")]
fn filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize logging at `info`
///
/// # Environment Variables
/// - `RUST_LOG` - Overrides the level filter
#[cfg(feature = "logging")]
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific level or directive
/// (e.g. `"debug"`, `"u_timetable=trace"`)
#[cfg(feature = "logging")]
pub fn init_with_level(level: &str) {
    let _ = fmt()
        .with_env_filter(filter_or(level))
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Initialize logging for tests
///
/// Output goes through the test harness capture; solver events are shown
/// down to `trace` unless `RUST_LOG` says otherwise.
#[cfg(feature = "logging")]
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(filter_or("u_timetable=trace"))
        .with_test_writer()
        .without_time()
        .try_init();
}

#[cfg(not(feature = "logging"))]
pub fn init() {}

#[cfg(not(feature = "logging"))]
pub fn init_with_level(_level: &str) {}

#[cfg(not(feature = "logging"))]
pub fn init_test() {}
