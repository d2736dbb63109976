use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber. The level is `info` unless debug
/// logging was enabled in the settings file; `RUST_LOG` is only consulted
/// in debug mode.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        // A leftover RUST_LOG in the environment must not turn a normal
        // run verbose.
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
