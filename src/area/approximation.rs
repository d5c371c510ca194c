use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Formula converting one angular grid cell into a physical area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Approximation {
    /// Flat cells: every cell covers `h * v`
    First,
    /// Cells shrink with `cos(latitude)` as meridians converge
    Second,
}

impl Approximation {
    pub const ALL: [Approximation; 2] = [Approximation::First, Approximation::Second];

    /// Area of one cell in km²
    ///
    /// # Arguments
    /// * `horizontal_km` - Cell width
    /// * `vertical_km` - Cell height
    /// * `latitude_deg` - Latitude of the cell, ignored by `First`
    pub fn cell_area(self, horizontal_km: f64, vertical_km: f64, latitude_deg: f64) -> f64 {
        match self {
            Approximation::First => horizontal_km * vertical_km,
            Approximation::Second => {
                horizontal_km * vertical_km * latitude_deg.to_radians().cos()
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Approximation::First => "FIRST",
            Approximation::Second => "SECOND",
        }
    }
}

impl fmt::Display for Approximation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which approximations a run evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApproximationSelector {
    #[default]
    First,
    Second,
    /// Both variants in the same pass
    All,
}

impl ApproximationSelector {
    pub fn variants(self) -> Vec<Approximation> {
        match self {
            ApproximationSelector::First => vec![Approximation::First],
            ApproximationSelector::Second => vec![Approximation::Second],
            ApproximationSelector::All => Approximation::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_ignores_latitude() {
        let a = Approximation::First.cell_area(2.5, 4.0, 10.0);
        let b = Approximation::First.cell_area(2.5, 4.0, 80.0);
        assert_eq!(a, b);
        assert_eq!(a, 10.0);
    }

    #[test]
    fn test_second_matches_first_at_equator() {
        let first = Approximation::First.cell_area(3.0, 7.0, 45.0);
        let second = Approximation::Second.cell_area(3.0, 7.0, 0.0);
        assert!((first - second).abs() < 1e-12);
    }

    #[test]
    fn test_second_shrinks_toward_poles() {
        let mut previous = f64::INFINITY;
        for lat in (0..=90).step_by(5) {
            let north = Approximation::Second.cell_area(1.0, 1.0, lat as f64);
            let south = Approximation::Second.cell_area(1.0, 1.0, -(lat as f64));
            assert!(north <= previous + 1e-12, "lat {}", lat);
            assert!((north - south).abs() < 1e-12);
            previous = north;
        }
        // cos(90°) is zero up to rounding
        assert!(Approximation::Second.cell_area(1.0, 1.0, 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_selector_expands_all() {
        assert_eq!(
            ApproximationSelector::All.variants(),
            vec![Approximation::First, Approximation::Second]
        );
        assert_eq!(
            ApproximationSelector::Second.variants(),
            vec![Approximation::Second]
        );
    }
}
