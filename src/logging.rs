//! Subscriber setup for the binary
//!
//! Filter precedence: `ASSETGEN_LOG`, then `RUST_LOG`, then the `-v` count.
//! Everything goes to stderr so stdout stays parseable with `--json`.

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "ASSETGEN_LOG";

/// Default directive for a `-v` count
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn build_filter(lookup: impl Fn(&str) -> Option<String>, verbose: u8) -> EnvFilter {
    [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .filter_map(|key| lookup(key).filter(|value| !value.trim().is_empty()))
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level_for(verbose)))
}

pub fn init(verbose: u8) {
    let filter = build_filter(|key| std::env::var(key).ok(), verbose);
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
