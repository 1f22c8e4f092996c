use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use executor::HttpExecutionClient;
use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = server::database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    info!("Database connected");

    let execution_client = HttpExecutionClient::new(config.executor.clone())
        .context("Failed to build execution service client")?;
    info!(base_url = %config.executor.base_url, "Execution service client ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        db,
        executor: Arc::new(execution_client),
        config: Arc::new(config),
    };

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
