use serde::Serialize;
use std::path::PathBuf;

use crate::area::{Approximation, ApproximationSelector};
use crate::config::scan;

/// Candidate sea level rises in meters, in test order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeaLevels(Vec<f64>);

impl SeaLevels {
    /// A rise of zero selects the default scan, anything else is tested alone.
    pub fn from_rise(rise_m: f64) -> Self {
        if rise_m == 0.0 {
            Self::scan(scan::MIN_RISE_M, scan::MAX_RISE_M, scan::STEPS)
        } else {
            Self::single(rise_m)
        }
    }

    pub fn single(rise_m: f64) -> Self {
        Self(vec![rise_m])
    }

    /// `steps` evenly spaced values from `min` to `max`, both included
    pub fn scan(min: f64, max: f64, steps: usize) -> Self {
        match steps {
            0 => Self(Vec::new()),
            1 => Self(vec![min]),
            _ => {
                let delta = (max - min) / (steps - 1) as f64;
                let mut levels: Vec<f64> = (0..steps).map(|i| min + delta * i as f64).collect();
                levels[steps - 1] = max;
                Self(levels)
            }
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub input: PathBuf,
    /// km, 0 = derive from the grid
    pub horizontal_spacing: f64,
    /// km, 0 = derive from the grid
    pub vertical_spacing: f64,
    pub sea_levels: SeaLevels,
    pub approximations: Vec<Approximation>,
}

impl SimulationConfig {
    pub fn new(
        input: PathBuf,
        horizontal_spacing: f64,
        vertical_spacing: f64,
        rise_m: f64,
        selector: ApproximationSelector,
    ) -> Self {
        Self {
            input,
            horizontal_spacing,
            vertical_spacing,
            sea_levels: SeaLevels::from_rise(rise_m),
            approximations: selector.variants(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scan() {
        let levels = SeaLevels::from_rise(0.0);
        assert_eq!(levels.len(), 50);
        assert_eq!(levels.as_slice()[0], 1.0);
        assert_eq!(levels.as_slice()[49], 800.0);
        // linspace step is 799 / 49
        assert!((levels.as_slice()[1] - (1.0 + 799.0 / 49.0)).abs() < 1e-9);
        assert!(levels.as_slice().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_rise() {
        let levels = SeaLevels::from_rise(2.5);
        assert!(levels.is_single());
        assert_eq!(levels.as_slice(), &[2.5]);
    }

    #[test]
    fn test_config_expands_selector() {
        let config = SimulationConfig::new(
            PathBuf::from("grid.txt"),
            0.0,
            0.0,
            10.0,
            ApproximationSelector::All,
        );
        assert_eq!(config.approximations.len(), 2);
        assert!(config.sea_levels.is_single());
    }
}
