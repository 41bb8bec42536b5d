use anyhow::Context;

use catalog_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values already present in the environment win over `.env`.
    let dotenv = dotenvy::dotenv();

    let config = ApiConfig::from_env().context("failed to read configuration")?;
    catalog_observability::init(config.log_format);

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!("failed to load .env: {e}");
        }
    }
    if config.uses_dev_token() {
        tracing::warn!("API_TOKEN not set; using insecure dev default");
    }

    let app = catalog_api::app::build_app(&config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
