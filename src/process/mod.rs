// src/process/mod.rs

pub mod aggregate;
pub mod date_parser;
pub mod utils;

use std::{path::Path, time::Instant};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::PipelineConfig;
use aggregate::{aggregate_city_file, MonthlyAggregate};

/// Runs the full transform-and-merge pipeline: aggregate each configured
/// input in order, concatenate, write the combined CSV. Returns the number
/// of combined rows.
#[instrument(level = "info", skip(config), fields(output = %config.output.display()))]
pub fn run_pipeline(config: &PipelineConfig) -> Result<usize> {
    let start = Instant::now();

    let combined = combine_cities(config)?;
    write_combined_csv(&combined, &config.output)?;

    info!(
        rows = combined.len(),
        elapsed = ?start.elapsed(),
        "pipeline complete"
    );
    Ok(combined.len())
}

/// Aggregates every configured input and concatenates the results, keeping
/// each city's rows together in configured order.
pub fn combine_cities(config: &PipelineConfig) -> Result<Vec<MonthlyAggregate>> {
    let mut combined = Vec::new();
    for input in &config.inputs {
        let monthly = aggregate_city_file(&input.path, &input.city)?;
        info!(city = %input.city, months = monthly.len(), "aggregated");
        combined.extend(monthly);
    }
    Ok(combined)
}

/// Writes the combined table as CSV with a header row and no index column.
pub fn write_combined_csv(rows: &[MonthlyAggregate], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating output file {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("writing row for {} {}-{}", row.city, row.year, row.month))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing output file {}", path.display()))?;
    Ok(())
}
