use anyhow::Context;
use tracing_subscriber::EnvFilter;

use wayfarer_api::{
    config::Config,
    routes::{create_router, frontend::file_mtime, AppState},
    services::Catalog,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let index = config.frontend_dist.join("index.html");
    tracing::info!(
        frontend_dist = %config.frontend_dist.display(),
        index_html = index.is_file(),
        mtime = %file_mtime(&index),
        "Frontend dist"
    );

    // The catalog is required; without it the server does not start
    let catalog = Catalog::load(&config.travel_data_path).with_context(|| {
        format!(
            "Failed to load data from {}",
            config.travel_data_path.display()
        )
    })?;

    let state = AppState::new(catalog, &config);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app).await?;

    Ok(())
}
