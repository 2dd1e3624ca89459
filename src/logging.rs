//! Logging setup.
//!
//! Everything goes to stderr so that `status` output on stdout stays clean.
//! `RUST_LOG` overrides the level picked from the command line.

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{Error, Result};

pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Logging(e.to_string()))
}
