use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Output profile of the process-wide subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, `debug` for this crate.
    Development,
    /// JSON lines, `info` for this crate.
    Production,
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber. Later calls are no-ops, as is a call made after another
/// global subscriber was installed elsewhere.
///
/// `RUST_LOG` overrides the profile's default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = |default: &str| {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
        };

        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter("section_retrieval=debug"))
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter("section_retrieval=info"))
                .try_init(),
        };

        if installed.is_err() {
            tracing::debug!("global subscriber already installed; keeping it");
        }
    });
}
