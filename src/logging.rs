use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "tabspaces=warn",
        1 => "tabspaces=debug",
        _ => "tabspaces=trace",
    }
}

/// Logs go to stderr; stdout is reserved for command output. `RUST_LOG`
/// overrides the `-v` level.
pub fn init(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    if subscriber.try_init().is_err() {
        return;
    }
    tracing::debug!(verbose, "tracing initialized");
}
