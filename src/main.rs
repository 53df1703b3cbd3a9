// src/main.rs

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wxmerge::{config::PipelineConfig, process};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) run the fixed four-city pipeline ─────────────────────────
    let config = PipelineConfig::default();
    let rows = process::run_pipeline(&config)?;

    info!(rows, output = %config.output.display(), "wrote combined monthly data");
    Ok(())
}
