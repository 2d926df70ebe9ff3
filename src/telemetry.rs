//! Diagnostics initialization.
//!
//! Controlled by `TWIG_LOG`:
//! - unset or empty → no subscriber is installed (tracing events are dropped)
//! - anything else → parsed as an `EnvFilter` directive (e.g. `debug`,
//!   `twig::artifacts::merge=trace`) and printed to stderr
//!
//! User-facing output never goes through tracing; it is written to the
//! repository writer so it stays stable regardless of this setting.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TWIG_LOG";

pub fn init() {
    let directives = std::env::var(LOG_ENV).ok();

    match directives.as_deref() {
        None | Some("") => {}
        Some(directives) => init_stderr(directives),
    }
}

fn init_stderr(directives: &str) {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

    // a second init (e.g. from tests) is not an error worth reporting
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init();
}
