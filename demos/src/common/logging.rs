//! Structured logging setup for the demo binaries.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects between `debug` and
/// `info` for the sketches crates.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "sketches_burn=debug,sketches_demos=debug"
    } else {
        "sketches_burn=info,sketches_demos=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}
