//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::CoreConfig;

/// Install the global fmt subscriber using the config's filter
///
/// Returns `false` if a subscriber was already installed. An invalid
/// `log_filter` falls back to `info`.
pub fn init(config: &CoreConfig) -> bool {
    let directive = config.log_directive();
    let (filter, invalid) = match EnvFilter::try_new(&directive) {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new("info"), true),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok();

    if invalid {
        tracing::warn!("Invalid log filter '{}', using 'info'", directive);
    }
    installed
}
