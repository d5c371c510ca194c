//! Streaming dry-area accumulation
//!
//! One forward pass over the grid file. Memory is one running total per
//! (approximation, sea level) pair, plus two per-record masks when exactly
//! one sea level is tested.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace, warn};

use super::config::SimulationConfig;
use super::results::DryMasks;
use crate::area::{Approximation, Spacing};
use crate::error::{GridError, Result};
use crate::grid::{GridRecord, GridShape};

/// Records between progress callbacks
const PROGRESS_INTERVAL: usize = 4096;

/// Raw running totals, indexed `[approximation][sea_level]`
#[derive(Debug, Clone)]
pub struct AreaTotals {
    pub approximations: Vec<Approximation>,
    /// km² above the current sea level
    pub old_dry_area: Vec<Vec<f64>>,
    /// km² above each candidate sea level
    pub new_dry_area: Vec<Vec<f64>>,
    pub masks: Option<DryMasks>,
    pub records_read: usize,
    /// Latitude changes that do not line up with band boundaries
    pub irregular_band_breaks: usize,
}

impl AreaTotals {
    fn new(approximations: &[Approximation], levels: usize, masks: Option<DryMasks>) -> Self {
        Self {
            approximations: approximations.to_vec(),
            old_dry_area: vec![vec![0.0; levels]; approximations.len()],
            new_dry_area: vec![vec![0.0; levels]; approximations.len()],
            masks,
            records_read: 0,
            irregular_band_breaks: 0,
        }
    }

    /// Add one record's contribution to every bucket.
    pub fn add_record(&mut self, record: &GridRecord, spacing: &Spacing, sea_levels: &[f64]) {
        let was_dry = record.elevation > 0.0;

        for (v, approximation) in self.approximations.iter().enumerate() {
            let area = approximation.cell_area(
                spacing.horizontal_km,
                spacing.vertical_km,
                record.latitude,
            );
            let old = &mut self.old_dry_area[v];
            let new = &mut self.new_dry_area[v];

            for (i, &sea_level) in sea_levels.iter().enumerate() {
                if was_dry {
                    old[i] += area;
                }
                if record.elevation > sea_level {
                    new[i] += area;
                }
            }
        }

        if let Some(masks) = self.masks.as_mut() {
            // Masks only exist for single-level runs
            let is_dry = sea_levels.first().is_some_and(|&s| record.elevation > s);
            masks.push(was_dry, is_dry);
        }

        self.records_read += 1;
    }
}

/// Accumulate old and new dry area over every record of `path`.
///
/// # Arguments
/// * `path` - Grid file, read sequentially
/// * `shape` - Shape inferred from the same file
/// * `spacing` - Cell size in km
/// * `config` - Approximations and sea levels to evaluate
/// * `progress` - Called with the number of records read so far
///
/// # Errors
/// Any malformed record aborts the pass; no partial totals are returned.
pub fn accumulate<F: FnMut(usize)>(
    path: &Path,
    shape: &GridShape,
    spacing: &Spacing,
    config: &SimulationConfig,
    mut progress: F,
) -> Result<AreaTotals> {
    let sea_levels = config.sea_levels.as_slice();
    let masks = config
        .sea_levels
        .is_single()
        .then(|| DryMasks::with_capacity(shape.total_records));
    let mut totals = AreaTotals::new(&config.approximations, sea_levels.len(), masks);

    let mut reader = BufReader::new(File::open(path)?);
    let mut line = Vec::new();
    let mut previous_latitude: Option<f64> = None;
    let rows = shape.rows_per_latitude_band;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let index = totals.records_read;
        let record = GridRecord::parse_bytes(&line, index + 1)?;

        if let Some(previous) = previous_latitude {
            let at_boundary = index % rows == 0;
            let changed = record.latitude != previous;
            if changed != at_boundary {
                trace!(
                    "Band irregularity at line {}: latitude {} -> {}",
                    index + 1,
                    previous,
                    record.latitude
                );
                totals.irregular_band_breaks += 1;
            }
        }
        previous_latitude = Some(record.latitude);

        totals.add_record(&record, spacing, sea_levels);

        if totals.records_read % PROGRESS_INTERVAL == 0 {
            progress(totals.records_read);
        }
    }
    progress(totals.records_read);

    if totals.records_read != shape.total_records {
        return Err(GridError::DegenerateShape(format!(
            "expected {} records, read {}; did the file change?",
            shape.total_records, totals.records_read
        )));
    }

    if totals.irregular_band_breaks > 0 {
        warn!(
            "{} latitude changes do not line up with bands of {} rows; results assume constant-latitude bands",
            totals.irregular_band_breaks, rows
        );
    }

    debug!(
        "Accumulated {} records over {} approximations x {} sea levels",
        totals.records_read,
        totals.approximations.len(),
        sea_levels.len()
    );
    Ok(totals)
}
