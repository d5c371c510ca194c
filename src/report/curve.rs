use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::simulation::SimulationResult;

/// Write percentage remaining per sea level as CSV.
///
/// Columns: `sea_level_m` then one `<approximation>_percent` column per
/// evaluated approximation, one row per tested sea level.
pub fn write_curve_csv(path: &Path, result: &SimulationResult) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create curve file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_curve(&mut writer, result)?;
    writer.flush()?;
    Ok(())
}

fn write_curve<W: Write>(out: &mut W, result: &SimulationResult) -> std::io::Result<()> {
    write!(out, "sea_level_m")?;
    for variant in &result.variants {
        write!(
            out,
            ",{}_percent",
            variant.approximation.name().to_lowercase()
        )?;
    }
    writeln!(out)?;

    for (i, sea_level) in result.sea_levels.as_slice().iter().enumerate() {
        write!(out, "{}", sea_level)?;
        for variant in &result.variants {
            write!(out, ",{:.4}", variant.scenarios[i].ratio * 100.0)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
