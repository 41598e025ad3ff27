// Wilayah API - Web Server
// Binds first, regenerates the JSON tree, then keeps serving it under the prefix

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wilayah_api::{build_router, generate_api, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    // Start server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let app = build_router(&config.output_dir, &config.api_prefix);
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    // Generation is blocking file I/O; requests for files not yet written get 404
    let gen_config = config.clone();
    let generated = tokio::task::spawn_blocking(move || generate_api(&gen_config))
        .await
        .context("Generation task panicked")?;

    if let Err(err) = generated {
        error!("Error generating API endpoints: {:#}", anyhow::Error::from(err));
        std::process::exit(1);
    }

    info!("Server is running on http://localhost:{}", config.port);
    info!("   API: http://localhost:{}{}/provinces.json", config.port, config.api_prefix.trim_end_matches('/'));

    server
        .await
        .context("Server task panicked")?
        .context("Failed to start server")?;

    Ok(())
}
