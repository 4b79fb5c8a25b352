mod config;
mod wiring;

use std::error::Error;

use runtime::GameEngine;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = config::Config::from_env()?;
    let engine = GameEngine::new(config.game, config.seed)?;
    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(
        addr = %config.listen_addr,
        seeded = config.seed.is_some(),
        total_steps = config.game.total_steps,
        "trade-server listening"
    );

    axum::serve(listener, wiring::build_app(engine)).await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
