use std::io;

use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber shared by every binary. `RUST_LOG` overrides
/// the default `info` level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
