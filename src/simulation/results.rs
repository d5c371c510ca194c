use serde::Serialize;

use super::accumulate::AreaTotals;
use super::config::{SeaLevels, SimulationConfig};
use crate::area::{Approximation, Spacing};
use crate::error::{GridError, Result};
use crate::grid::GridShape;

/// Dry area before and after one candidate rise
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub sea_level_m: f64,
    pub old_dry_area_km2: f64,
    pub new_dry_area_km2: f64,
    /// `new_dry_area_km2 / old_dry_area_km2`
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantResult {
    pub approximation: Approximation,
    pub scenarios: Vec<ScenarioResult>,
}

/// Per-record dry flags in file order
///
/// Both masks depend only on elevation, so one pair serves every approximation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DryMasks {
    pub was_dry_before: Vec<bool>,
    pub is_dry_after_rise: Vec<bool>,
}

impl DryMasks {
    pub fn with_capacity(records: usize) -> Self {
        Self {
            was_dry_before: Vec::with_capacity(records),
            is_dry_after_rise: Vec::with_capacity(records),
        }
    }

    pub fn push(&mut self, was_dry: bool, is_dry: bool) {
        self.was_dry_before.push(was_dry);
        self.is_dry_after_rise.push(is_dry);
    }

    pub fn len(&self) -> usize {
        self.was_dry_before.len()
    }

    pub fn is_empty(&self) -> bool {
        self.was_dry_before.is_empty()
    }

    /// Reshape a flat mask into `longitude_band_count` rows of
    /// `rows_per_latitude_band` cells. Records past the last whole band are dropped.
    pub fn to_grid(mask: &[bool], shape: &GridShape) -> Vec<Vec<bool>> {
        if shape.rows_per_latitude_band == 0 {
            return Vec::new();
        }
        mask.chunks_exact(shape.rows_per_latitude_band)
            .take(shape.longitude_band_count)
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Everything one run produces
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub shape: GridShape,
    pub spacing: Spacing,
    pub sea_levels: SeaLevels,
    pub variants: Vec<VariantResult>,
    /// Present only for single sea level runs
    #[serde(skip)]
    pub masks: Option<DryMasks>,
    pub irregular_band_breaks: usize,
}

impl SimulationResult {
    /// Turn raw totals into ratios.
    ///
    /// # Errors
    /// `GridError::NoDryLand` when a variant has no dry area before the rise,
    /// since the ratio would be NaN or infinite.
    pub fn from_totals(
        shape: GridShape,
        spacing: Spacing,
        config: &SimulationConfig,
        totals: AreaTotals,
    ) -> Result<Self> {
        let sea_levels = config.sea_levels.clone();
        let mut variants = Vec::with_capacity(totals.approximations.len());

        for (v, &approximation) in totals.approximations.iter().enumerate() {
            let scenarios = sea_levels
                .as_slice()
                .iter()
                .enumerate()
                .map(|(i, &sea_level)| {
                    let old = totals.old_dry_area[v][i];
                    let new = totals.new_dry_area[v][i];
                    if old == 0.0 {
                        return Err(GridError::NoDryLand {
                            approximation,
                            sea_level,
                        });
                    }
                    Ok(ScenarioResult {
                        sea_level_m: sea_level,
                        old_dry_area_km2: old,
                        new_dry_area_km2: new,
                        ratio: new / old,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            variants.push(VariantResult {
                approximation,
                scenarios,
            });
        }

        Ok(Self {
            shape,
            spacing,
            sea_levels,
            variants,
            masks: totals.masks,
            irregular_band_breaks: totals.irregular_band_breaks,
        })
    }

    pub fn variant(&self, approximation: Approximation) -> Option<&VariantResult> {
        self.variants
            .iter()
            .find(|v| v.approximation == approximation)
    }

    pub fn is_single_level(&self) -> bool {
        self.sea_levels.is_single()
    }
}
