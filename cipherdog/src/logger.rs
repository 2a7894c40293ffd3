//! Logging setup.

use std::io::IsTerminal;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the INFO default.
///
/// Safe to call more than once; only the first call wins.
pub fn init() {
    let format = fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_file(false);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(format)
        .with(filter)
        .try_init();
}

/// Same as [`init`], but emits one JSON object per event.
pub fn init_json() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_init_twice() {
        init();
        init();
        init_json();
        tracing::info!("logger installed");
    }
}
