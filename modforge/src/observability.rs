//! Logging setup
//!
//! Log output goes to stderr so it never interleaves with the run report on
//! stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "MODFORGE_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid
#[must_use]
pub fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    }
}

/// Install the global subscriber
///
/// Reads filter directives from `MODFORGE_LOG`, falling back to `warn` (or
/// `debug` when `verbose`). Calling this again after a subscriber is installed
/// does nothing.
///
/// # Example
///
/// ```rust,no_run
/// use modforge::observability;
///
/// observability::init(false);
/// tracing::warn!("visible by default");
/// ```
pub fn init(verbose: bool) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(verbose));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
