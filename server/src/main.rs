#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics from bad input.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unicorns::{
    UnicornService, UnicornStore,
    config::ServerConfig,
    store::{self, NewUnicorn, SeedError},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unicorns=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: listen_port={}, static_directory={}, seed_file={:?}",
        config.listen_port,
        config.static_directory.display(),
        config.seed_file
    );

    let seed = match load_seed(&config) {
        Ok(seed) => seed,
        Err(e) => {
            tracing::error!("Failed to load seed data: {e}");
            std::process::exit(1);
        }
    };

    let store = match UnicornStore::with_records(seed) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Seed data is inconsistent: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Store initialized with {} unicorns", store.len());

    let app = unicorns::routes::router(UnicornService::new(store), &config.static_directory);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });
    tracing::info!("Server is running on port {}", config.listen_port);

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}

fn load_seed(config: &ServerConfig) -> Result<Vec<NewUnicorn>, SeedError> {
    match &config.seed_file {
        Some(path) => store::load_seed_file(path),
        None => store::builtin_seed(),
    }
}
