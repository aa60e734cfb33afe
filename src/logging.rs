//! Logger setup for the headless driver

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Level used when `RUST_LOG` is unset
fn default_level(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Info }
}

/// Install env_logger with millisecond timestamps
///
/// `RUST_LOG` wins over `verbose`. Per-tick events log at trace, so they only
/// show up when asked for explicitly.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    if Builder::from_env(env).format_timestamp_millis().try_init().is_err() {
        log::debug!("Logger already installed");
    }
}
