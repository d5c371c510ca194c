//! A full sea level run: shape inference, spacing, accumulation and ratios

pub mod accumulate;
pub mod config;
pub mod results;

pub use accumulate::{AreaTotals, accumulate};
pub use config::{SeaLevels, SimulationConfig};
pub use results::{DryMasks, ScenarioResult, SimulationResult, VariantResult};

use crate::area::Spacing;
use crate::error::Result;
use crate::grid::GridShape;

/// Run every stage for `config` without progress reporting.
pub fn run(config: &SimulationConfig) -> Result<SimulationResult> {
    let shape = GridShape::infer(&config.input)?;
    let spacing = Spacing::resolve(&shape, config.horizontal_spacing, config.vertical_spacing)?;
    let totals = accumulate(&config.input, &shape, &spacing, config, |_| {})?;
    SimulationResult::from_totals(shape, spacing, config, totals)
}
