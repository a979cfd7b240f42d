// src/io/reporting.rs

use crate::error::Result;
use crate::evolution::stats::{EvolutionReport, GenerationStats};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the per-generation (min, mean, max) history to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/history.csv").
/// * `data` - The history recorded by the genetic algorithm.
pub fn write_generation_history<P: AsRef<Path>>(file_path: P, data: &[GenerationStats]) -> Result<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!("Exported {} generations to '{}'", data.len(), path.display());
    Ok(())
}

/// Writes the final report (best weights, final statistics, history) as JSON.
pub fn write_summary<P: AsRef<Path>>(file_path: P, report: &EvolutionReport) -> Result<()> {
    let path = file_path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    info!("Wrote summary of {} generations to '{}'", report.generations, path.display());
    Ok(())
}
