use anyhow::Result;
use racetally::config::Config;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) resolve configuration ────────────────────────────────────
    let config = Config::resolve(std::env::args())?;
    info!(
        input = %config.input_dir.display(),
        output = %config.output_path.display(),
        keep = ?config.keep_count,
        "startup"
    );

    // ─── 3) run the season pipeline ──────────────────────────────────
    racetally::run(&config).await?;

    info!("all done");
    Ok(())
}
