use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; debug logging can be
/// explicitly enabled via the settings file, in which case `RUST_LOG` may
/// override the level.
pub fn init(debug: bool) {
    // With debug logging disabled we force `info` regardless of `RUST_LOG`,
    // so a stray environment variable cannot make the shell verbose.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
