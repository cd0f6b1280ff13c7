//! Logger setup for binaries built on the controller

/// Initialize the logging system with a fallback filter
///
/// `RUST_LOG` still wins when it is set. Safe to call more than once; only
/// the first call installs the logger.
pub fn init_with_level(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

