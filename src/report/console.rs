use std::io::{self, Write};

use crate::simulation::SimulationResult;

/// Write the per-approximation area summary.
///
/// Single-level runs print one block per approximation; scans print a table
/// with one row per sea level.
pub fn write_summary<W: Write>(out: &mut W, result: &SimulationResult) -> io::Result<()> {
    for variant in &result.variants {
        writeln!(out, "Results for approximation: {}", variant.approximation)?;

        if result.is_single_level() {
            let s = &variant.scenarios[0];
            writeln!(out, "  Sea level rise:       {:.2} m", s.sea_level_m)?;
            writeln!(out, "  Old dry area:         {:.2} sq-km", s.old_dry_area_km2)?;
            writeln!(out, "  New dry area:         {:.2} sq-km", s.new_dry_area_km2)?;
            writeln!(out, "  Percentage remaining: {:.2}%", s.ratio * 100.0)?;
        } else {
            writeln!(
                out,
                "  {:>10}  {:>16}  {:>16}  {:>9}",
                "rise [m]", "old dry [km2]", "new dry [km2]", "remaining"
            )?;
            for s in &variant.scenarios {
                writeln!(
                    out,
                    "  {:>10.2}  {:>16.2}  {:>16.2}  {:>8.2}%",
                    s.sea_level_m,
                    s.old_dry_area_km2,
                    s.new_dry_area_km2,
                    s.ratio * 100.0
                )?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{Approximation, Spacing};
    use crate::grid::{GridRecord, GridShape};
    use crate::simulation::{ScenarioResult, SeaLevels, VariantResult};

    fn result(levels: &[f64]) -> SimulationResult {
        let record = GridRecord {
            latitude: 0.0,
            longitude: 0.0,
            elevation: 1.0,
        };
        let scenarios = levels
            .iter()
            .map(|&l| ScenarioResult {
                sea_level_m: l,
                old_dry_area_km2: 3.0,
                new_dry_area_km2: 2.0,
                ratio: 2.0 / 3.0,
            })
            .collect();
        let sea_levels = if levels.len() == 1 {
            SeaLevels::single(levels[0])
        } else {
            SeaLevels::scan(levels[0], levels[levels.len() - 1], levels.len())
        };
        SimulationResult {
            shape: GridShape::from_counts(4, 2, record, record).unwrap(),
            spacing: Spacing::new(1.0, 1.0),
            sea_levels,
            variants: vec![VariantResult {
                approximation: Approximation::First,
                scenarios,
            }],
            masks: None,
            irregular_band_breaks: 0,
        }
    }

    #[test]
    fn test_single_level_summary() {
        let mut out = Vec::new();
        write_summary(&mut out, &result(&[10.0])).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Results for approximation: FIRST"));
        assert!(text.contains("Old dry area:         3.00 sq-km"));
        assert!(text.contains("Percentage remaining: 66.67%"));
    }

    #[test]
    fn test_scan_table_has_a_row_per_level() {
        let mut out = Vec::new();
        write_summary(&mut out, &result(&[1.0, 2.0, 3.0])).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("66.67%").count(), 3);
        assert!(text.contains("rise [m]"));
    }
}
