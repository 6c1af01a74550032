pub mod config;
pub mod credentials;
pub mod decide;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod kakao;
pub mod models;
pub mod snapshot;
pub mod watcher;

use tracing_subscriber::EnvFilter;

/// Install the stdout log subscriber. `RUST_LOG` overrides the default level.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "somoim_watch=info".into()),
        )
        .init();
}
