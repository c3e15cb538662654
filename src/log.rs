// src/log.rs
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Crate log level for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(verbosity: u8) -> String {
    format!("info,review_scrape={}", level_for(verbosity))
}

/// Install the global subscriber: human-readable lines on stderr, plus an
/// append-only copy in `log_file` when given.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    let file_layer = match log_file {
        Some(path) => {
            crate::file::ensure_parent(path)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| Error::io(path, e))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Options(format!("logging already initialised: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_crate_level_only() {
        assert_eq!(default_directives(0), "info,review_scrape=info");
        assert_eq!(default_directives(1), "info,review_scrape=debug");
        assert_eq!(default_directives(5), "info,review_scrape=trace");
    }
}
