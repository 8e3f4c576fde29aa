use std::{fs::OpenOptions, path::Path};

use anyhow::{Context, Result};
use diagnosis::{AppConfig, ModelRegistry, PageRouter};
use env_logger::{Env, Target};
use log::info;

mod app;
mod ui;

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("loading the configuration")?;
    init_logging(&config.log_file)?;

    info!("loading models from {}", config.models_dir.display());
    let registry = ModelRegistry::from_config(&config);

    app::run::run(PageRouter::new(registry))
}

/// The terminal belongs to the UI, so records go to `path` instead of stderr.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file '{}'", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
