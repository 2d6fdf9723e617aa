pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod parse;
pub mod score;
pub mod season;

use anyhow::Result;
use tracing::info;

use config::Config;

/// Run the full season pipeline: discover and parse event files, combine them
/// into season sequences, apply the drop-lowest rule, rank, and write the CSV
/// report. Strictly sequential; any stage failure aborts the run with nothing
/// written.
pub async fn run(config: &Config) -> Result<()> {
    let events = ingest::read_event_dir(&config.input_dir, config).await?;
    info!(events = events.len(), dir = %config.input_dir.display(), "parsed event files");

    let mut season = season::combine(&events);
    info!(classes = season.len(), "combined season aggregate");

    season::trim_scores(&mut season, config.keep_count);
    let ranked = season::rank(&season);

    export::write_csv(&config.output_path, &ranked).await?;
    info!(out = %config.output_path.display(), "wrote season report");
    Ok(())
}
