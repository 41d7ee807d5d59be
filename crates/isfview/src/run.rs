use anyhow::{Context, Result};
use isf::{load_source, parse_manifest, SourceHandle};
use renderer::{Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let handle = SourceHandle::from_input(&cli.shader);
    tracing::info!(source = %handle, "loading ISF shader");

    let body = load_source(&handle).context("failed to load shader source")?;

    if let Some(manifest) = parse_manifest(&body) {
        if let Some(description) = manifest.description.as_deref() {
            tracing::info!(%description, "shader metadata");
        }
        if let Some(credit) = manifest.credit.as_deref() {
            tracing::info!(%credit, "shader credit");
        }
        manifest.warn_unsupported();
    }

    let config = RendererConfig {
        fragment_body: body,
        target_fps: cli.fps,
        window_title: format!("isfview: {handle}"),
        ..RendererConfig::default()
    };

    Renderer::new(config).run()
}
