//! seamap - Estimate how much land stays above water under sea level rise

pub mod area;
pub mod config;
pub mod error;
pub mod grid;
pub mod report;
pub mod simulation;

pub use error::{GridError, Result};
