#![forbid(unsafe_code)]

//! Structured logging.
//!
//! The simulator emits `tracing` events at its decision points:
//!
//! | Level   | Event                                                        |
//! |---------|--------------------------------------------------------------|
//! | `debug` | drag started / continued / superseded, plan computed, drop   |
//! | `debug` | hit-test calibration result, external mouseup ended a drag   |
//! | `trace` | each interpolation step, each dispatched event, hit-test miss |
//!
//! Without a subscriber these cost nothing. With the `tracing-json` feature
//! this module offers subscriber helpers that honour `RUST_LOG`.

#[cfg(feature = "tracing-json")]
use tracing_subscriber::EnvFilter;

/// Error returned when a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install a JSON-lines subscriber writing to stderr.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), InitError> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
}

/// Install a human-readable subscriber writing to stderr.
#[cfg(feature = "tracing-json")]
pub fn init_pretty() -> Result<(), InitError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
}
