// src/io/reporting.rs

use crate::error::SimResult;
use crate::simulation::episode::StepRecord;
use std::path::Path;

/// Writes an episode history to a CSV file, one row per step.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/episode_1.csv").
/// * `data` - The step records collected by `run_episode`.
pub fn write_episode_log<P: AsRef<Path>>(file_path: P, data: &[StepRecord]) -> SimResult<()> {
    let path = file_path.as_ref();

    let mut wtr = csv::Writer::from_path(path)?;
    for record in data {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    log::info!("Exported {} rows to '{}'", data.len(), path.display());
    Ok(())
}
