// One-shot generation: clear the output directory and rebuild the JSON tree

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wilayah_api::{generate_api, Config, VERSION};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    info!(
        version = VERSION,
        data_dir = %config.data_dir.display(),
        output_dir = %config.output_dir.display(),
        "wilayah generator"
    );

    let report = generate_api(&config).context("Error generating API endpoints")?;

    info!(
        provinces = report.provinces,
        regencies = report.regencies,
        districts = report.districts,
        villages = report.villages,
        listings = report.listings,
        "wrote {} artifacts",
        report.artifacts()
    );

    Ok(())
}
