use anyhow::Context;
use todo_api::config::Config;
use todo_api::{app, cors_layer, db, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing().map_err(|e| anyhow::anyhow!(e))?;

    let config = Config::from_env()?;
    let repo = db::connect(&config.database)
        .await
        .context("failed to open the todos database")?;
    tracing::info!("Todos table is ready");

    let cors = cors_layer(&config.client_origin)
        .with_context(|| format!("invalid CLIENT_ORIGIN {:?}", config.client_origin))?;
    let router = app(AppState::new(repo), cors);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, client_origin = %config.client_origin, "server starting");

    axum::serve(listener, router).await?;
    Ok(())
}
