use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The default filter is `stride=warn`; `RUST_LOG` overrides it. Output
/// goes to stderr so diagnostics never land inside the alternate screen.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stride=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
