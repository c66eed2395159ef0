use tracing_subscriber::EnvFilter;

/// Initialize tracing and bridge `log` to `tracing`.
/// `RUST_LOG` takes precedence over `default_filter` when it is set.
pub fn init_tracing(default_filter: &str) {
    // Bridge `log` records into `tracing` so the `log` macros are captured
    let _ = tracing_log::LogTracer::init();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init so a second call (e.g. from tests) does not panic
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_names(true)
        .try_init()
        .ok();
}
