//! Logger setup shared by the runner binary and the tests.

use env_logger::{Builder as LogBuilder, Env as EnvLoggerEnv};
use log::LevelFilter;

/// Initialize `env_logger`, honouring `RUST_LOG` and falling back to
/// `default_filter`. Calling it more than once is harmless.
pub fn init_logger(default_filter: &str) {
    let _ignore_result = LogBuilder::from_env(EnvLoggerEnv::default().filter_or("RUST_LOG", default_filter))
        .filter_module("tungstenite", LevelFilter::Off)
        .filter_module("chromiumoxide::conn", LevelFilter::Off)
        .filter_module("chromiumoxide::handler", LevelFilter::Warn)
        .try_init();
}

/// Initializes the logger for tests.
pub fn init_test_logger() {
    let _ignore_result = LogBuilder::from_env(EnvLoggerEnv::default().filter_or("RUST_LOG", "error"))
        .filter_module("tungstenite", LevelFilter::Off)
        .filter_module("chromiumoxide::conn", LevelFilter::Off)
        .is_test(true)
        .try_init();
}
