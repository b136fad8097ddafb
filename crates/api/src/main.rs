use admissions_api::{build_app, ApiConfig};
use admissions_observability::init_tracing;
use anyhow::{Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("admissions_api");

    let config = ApiConfig::from_env()?;
    let app = build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(
        bind = %config.bind,
        static_root = %config.static_root.display(),
        "admissions assistant api started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
