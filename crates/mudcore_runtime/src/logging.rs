//! Log output for the shell.
//!
//! Library crates only emit `tracing` events; this installs the subscriber
//! that prints them. Output goes to stderr so it does not interleave with
//! game text on stdout.

use mudcore_foundation::{Error, ErrorKind, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when neither an explicit filter nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter: `explicit` if given, else `RUST_LOG`, else
/// [`DEFAULT_FILTER`].
///
/// # Errors
///
/// Returns an error if `explicit` is not a valid filter directive.
pub fn build_filter(explicit: Option<&str>) -> Result<EnvFilter> {
    match explicit {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| {
                Error::new(ErrorKind::Internal(format!(
                    "bad log filter {directives:?}: {e}"
                )))
            }),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init(explicit: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(explicit)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))
}
