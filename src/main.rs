use anyhow::Context;
use oidc_provider::http::{self, AppState};
use oidc_provider::{Config, KeyMaterial, TokenEngine};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    info!("Starting OIDC provider");

    let keys = KeyMaterial::from_pem_files(&config.public_key_path, &config.private_key_path)
        .context("Failed to load signing keys")?;
    info!(key_id = %keys.key_id(), "Loaded signing key");

    let engine = Arc::new(TokenEngine::new(config.issuer.clone(), Arc::new(keys)));
    let state = AppState::new(engine, config.code_ttl_seconds, config.token_ttl_seconds);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;

    info!(issuer = %config.issuer, "OIDC provider listening on {}", config.bind_address());

    axum::serve(listener, http::router(state)).await?;

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `LOG_LEVEL`.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
