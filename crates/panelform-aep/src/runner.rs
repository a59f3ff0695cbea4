//! Main runner for the AEP reshape pipeline

use std::time::Instant;

use anyhow::{Context, Result};
use panelform_core::ProgressContext;

use crate::config::Config;
use crate::serial::SerialMap;
use crate::tidy::UnitPolicy;
use crate::{fill, ingest, pivot, tidy, writer};

/// Pipeline execution summary
#[derive(Debug)]
pub struct Summary {
    pub files_read: usize,
    pub observations: usize,
    pub countries: usize,
    pub series_written: usize,
    pub elapsed: std::time::Duration,
}

/// Run the full reshape: ingest, normalize, pivot, gap-fill, write.
///
/// Deterministic single-attempt batch job: malformed input aborts the run
/// before anything is written; an empty input directory produces a
/// header-only output file.
pub fn run(config: &Config, progress: &ProgressContext) -> Result<Summary> {
    let start = Instant::now();

    log::info!("Reading {}", config.input_dir.display());
    let ingested = ingest::load_dir(&config.input_dir, progress)?;
    log::info!(
        "Ingested {} observations from {} files",
        ingested.observations.len(),
        ingested.files_read
    );

    let serials = SerialMap::build(&ingested.observations);
    let unit_policy = UnitPolicy::detect(&ingested.observations);
    log::debug!(
        "{} distinct countries, unit policy: {:?}",
        serials.len(),
        unit_policy
    );

    let countries = serials.len();
    let tidy_rows = tidy::normalize(
        ingested.observations,
        &serials,
        unit_policy,
        &config.source_link,
    );

    let mut wide = pivot::pivot(&tidy_rows);
    log::info!("Pivoted into {} series", wide.len());

    fill::fill_table(&mut wide);

    writer::write_csv(&mut wide, &config.output_path)
        .with_context(|| format!("failed to write {}", config.output_path.display()))?;

    let summary = Summary {
        files_read: ingested.files_read,
        observations: tidy_rows.len(),
        countries,
        series_written: wide.len(),
        elapsed: start.elapsed(),
    };

    log::info!("=== AEP Reshape Summary ===");
    log::info!("Files: {}", summary.files_read);
    log::info!(
        "Observations: {} across {} countries",
        summary.observations,
        summary.countries
    );
    log::info!(
        "Series: {} -> {}",
        summary.series_written,
        config.output_path.display()
    );
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    Ok(summary)
}
