//! Grid geometry inferred from record ordering
//!
//! Input files carry no header. Records are expected in contiguous bands of
//! constant latitude, so the length of the first band gives the number of rows
//! per band and the total line count gives the number of bands.

use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use super::last_segment::{LastSegment, read_last_segment};
use super::record::GridRecord;
use crate::error::{GridError, Result};

const RECORD_SEPARATOR: &[u8] = b"\n";

#[derive(Debug, Clone, Serialize)]
pub struct GridShape {
    /// Records sharing one latitude value
    pub rows_per_latitude_band: usize,
    /// `total_records / rows_per_latitude_band`, rounded down
    pub longitude_band_count: usize,
    pub total_records: usize,
    pub first_record: GridRecord,
    pub last_record: GridRecord,
}

impl GridShape {
    /// Infer the grid shape of a file on disk.
    pub fn infer(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut line = Vec::new();

        let mut total_records = 0usize;
        let mut first_record: Option<GridRecord> = None;
        let mut rows_per_latitude_band = 0usize;
        let mut in_first_band = true;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            total_records += 1;

            // Records past the first band are only counted here
            if !in_first_band {
                continue;
            }

            let record = GridRecord::parse_bytes(&line, total_records)?;
            match first_record {
                None => {
                    first_record = Some(record);
                    rows_per_latitude_band = 1;
                }
                Some(first) if record.latitude == first.latitude => {
                    rows_per_latitude_band += 1;
                }
                Some(_) => in_first_band = false,
            }
        }

        let first_record = first_record.ok_or_else(|| GridError::EmptyInput {
            path: path.to_path_buf(),
        })?;

        let mut file = File::open(path)?;
        let last_record = match read_last_segment(&mut file, RECORD_SEPARATOR, 1)? {
            LastSegment::AfterDelimiter(bytes) => {
                GridRecord::parse_bytes(&bytes, total_records)?
            }
            LastSegment::WholeSource(bytes) => {
                debug!("No record separator before the last record, single-line file");
                GridRecord::parse_bytes(&bytes, total_records)?
            }
        };

        let shape = Self::from_counts(
            total_records,
            rows_per_latitude_band,
            first_record,
            last_record,
        )?;
        debug!(
            "Grid {}: {} records, {} rows per band, {} bands",
            path.display(),
            shape.total_records,
            shape.rows_per_latitude_band,
            shape.longitude_band_count
        );
        Ok(shape)
    }

    /// Build a shape from already-known counts.
    pub fn from_counts(
        total_records: usize,
        rows_per_latitude_band: usize,
        first_record: GridRecord,
        last_record: GridRecord,
    ) -> Result<Self> {
        if rows_per_latitude_band == 0 {
            return Err(GridError::DegenerateShape(
                "zero rows per latitude band".to_string(),
            ));
        }

        Ok(Self {
            rows_per_latitude_band,
            longitude_band_count: total_records / rows_per_latitude_band,
            total_records,
            first_record,
            last_record,
        })
    }

    /// Number of records covered by whole bands
    pub fn grid_len(&self) -> usize {
        self.rows_per_latitude_band * self.longitude_band_count
    }

    /// Whether every record belongs to a complete band
    pub fn is_rectangular(&self) -> bool {
        self.grid_len() == self.total_records
    }
}
