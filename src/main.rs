use anyhow::{Context, Result};
use ntee_outreach::{pipeline, PipelineConfig};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stdout carries the report, so logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) configure paths ──────────────────────────────────────────
    let config = PipelineConfig::from_args(std::env::args().skip(1))
        .context("usage: ntee_outreach [INPUT_CSV] [OUTPUT_CSV]")?;
    info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        "startup"
    );

    // ─── 3) run ──────────────────────────────────────────────────────
    let start = Instant::now();
    let report = pipeline::run(&config).with_context(|| {
        format!(
            "building contact list from {}",
            config.input_path.display()
        )
    })?;

    info!(
        exported = report.summary.exported,
        path = %report.output_path.display(),
        elapsed = ?start.elapsed(),
        "all done"
    );
    Ok(())
}
