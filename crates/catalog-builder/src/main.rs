mod builder;
mod config;
mod error;
mod scanner;
mod templates;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting catalog-builder");

    let config = Config::from_env()?;
    info!(
        images_root = %config.images_root.display(),
        output = %config.output_path.display(),
        missing_category = ?config.missing_category,
        fabric_names = ?config.fabric_names,
        "configuration loaded"
    );

    let generated_at = chrono::Utc::now();
    let summary = builder::run(&config, generated_at).inspect_err(|e| {
        tracing::error!(error = %e, "catalog generation failed");
    })?;

    info!(products = summary.total, "catalog-builder finished");
    Ok(())
}
