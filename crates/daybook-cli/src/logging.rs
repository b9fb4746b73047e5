use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`RUST_LOG` syntax).
pub const LOG_ENV: &str = "DAYBOOK_LOG";

/// Install a stderr subscriber. Library crates log through `log`, whose records
/// the subscriber picks up as well.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
