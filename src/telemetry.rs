// 📡 Telemetry - Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Initialize logging for the process, filtered through `RUST_LOG` (default `info`).
///
/// Calling it again is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_twice_is_harmless() {
        super::init();
        super::init();
        tracing::info!("telemetry initialized");
    }
}
