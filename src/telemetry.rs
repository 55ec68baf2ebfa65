use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` overrides the default `watchlist_core=info` filter. Calling this
/// more than once (e.g. from several tests) is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchlist_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
