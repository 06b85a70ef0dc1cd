use tracing_subscriber::EnvFilter;

/// Initialise logging for the plugin process. Output goes to stderr because
/// stdout carries the JSON replies read by the host.
///
/// `debug` comes from `debug_logging` in `settings.json`.
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    // Only honour `RUST_LOG` when debug logging was asked for; a stray variable
    // in the host's environment must not flood its log.
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    // Hosts capture stderr into plain log files.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
