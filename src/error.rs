//! Error types for grid parsing and area accumulation.

use std::path::PathBuf;
use thiserror::Error;

use crate::area::Approximation;

/// Errors that can occur while reading a grid or computing dry areas.
#[derive(Debug, Error)]
pub enum GridError {
    /// I/O error reading the input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file has no records.
    #[error("Input file has no records: {}", path.display())]
    EmptyInput { path: PathBuf },

    /// A record does not hold three numeric fields.
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        reason: String,
    },

    /// The inferred grid shape cannot be used.
    #[error("Degenerate grid shape: {0}")]
    DegenerateShape(String),

    /// Cell spacing resolved to zero or a non-finite value.
    #[error("Degenerate cell spacing: {horizontal_km} km x {vertical_km} km")]
    DegenerateSpacing {
        horizontal_km: f64,
        vertical_km: f64,
    },

    /// No cell was above the current sea level, so no ratio exists.
    #[error("No dry land under {approximation} approximation (sea level {sea_level} m)")]
    NoDryLand {
        approximation: Approximation,
        sea_level: f64,
    },

    /// Record separator for the backward scan was empty.
    #[error("Zero-length record separator")]
    EmptySeparator,
}

pub type Result<T> = std::result::Result<T, GridError>;
