use anyhow::{Context, Result, bail};
use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use std::path::Path;

use crate::simulation::{DryMasks, SimulationResult};

const LAND: Rgb<u8> = Rgb([34, 139, 34]);
const WATER: Rgb<u8> = Rgb([30, 90, 170]);
const LAND_LOST: Rgb<u8> = Rgb([178, 24, 43]);
const UNCHANGED: Rgb<u8> = Rgb([224, 224, 224]);
const GAP: Rgb<u8> = Rgb([255, 255, 255]);

/// Blank columns between the two panels
const GAP_PIXELS: u32 = 4;

/// Render the before/after map, one pixel per grid cell, first record at the top left
///
/// - left panel: land (green) and water (blue) after the rise
/// - right panel: land lost to the rise (red), everything else gray
///
/// # Errors
/// Fails for results without dry masks (sea level scans).
pub fn render_map(result: &SimulationResult) -> Result<RgbImage> {
    let Some(masks) = result.masks.as_ref() else {
        bail!("Maps need a single sea level run");
    };

    let after = DryMasks::to_grid(&masks.is_dry_after_rise, &result.shape);
    let before = DryMasks::to_grid(&masks.was_dry_before, &result.shape);

    let height = after.len() as u32;
    let panel_width = result.shape.rows_per_latitude_band as u32;
    let width = panel_width * 2 + GAP_PIXELS;

    let mut img = ImageBuffer::from_pixel(width, height, GAP);

    for (y, (after_row, before_row)) in after.iter().zip(&before).enumerate() {
        let y = y as u32;
        for (x, (&dry_after, &dry_before)) in after_row.iter().zip(before_row).enumerate() {
            let x = x as u32;
            img.put_pixel(x, y, if dry_after { LAND } else { WATER });

            let lost = dry_before && !dry_after;
            img.put_pixel(
                panel_width + GAP_PIXELS + x,
                y,
                if lost { LAND_LOST } else { UNCHANGED },
            );
        }
    }

    Ok(img)
}

/// Write the before/after map as a PNG
///
/// # Arguments
/// * `path` - Output image path
/// * `result` - A single sea level result carrying dry masks
///
/// # Returns
/// * Size of the written file in bytes
pub fn write_map(path: &Path, result: &SimulationResult) -> Result<u64> {
    let img = render_map(result)?;
    if img.width() == 0 || img.height() == 0 {
        bail!("Grid has no complete band to draw");
    }

    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write map image: {}", path.display()))?;

    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat map image: {}", path.display()))?
        .len();
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{Approximation, Spacing};
    use crate::grid::{GridRecord, GridShape};
    use crate::simulation::{ScenarioResult, SeaLevels, VariantResult};
    use std::fs;
    use tempfile::tempdir;

    fn result(masks: Option<DryMasks>) -> SimulationResult {
        let record = GridRecord {
            latitude: 0.0,
            longitude: 0.0,
            elevation: 1.0,
        };
        SimulationResult {
            shape: GridShape::from_counts(4, 2, record, record).unwrap(),
            spacing: Spacing::new(1.0, 1.0),
            sea_levels: SeaLevels::single(10.0),
            variants: vec![VariantResult {
                approximation: Approximation::First,
                scenarios: vec![ScenarioResult {
                    sea_level_m: 10.0,
                    old_dry_area_km2: 3.0,
                    new_dry_area_km2: 2.0,
                    ratio: 2.0 / 3.0,
                }],
            }],
            masks,
            irregular_band_breaks: 0,
        }
    }

    fn masks() -> DryMasks {
        DryMasks {
            was_dry_before: vec![false, true, true, true],
            is_dry_after_rise: vec![false, false, true, true],
        }
    }

    #[test]
    fn test_write_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.png");

        let size = write_map(&path, &result(Some(masks()))).unwrap();
        assert_eq!(size, fs::metadata(&path).unwrap().len());

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (8, 2));

        // Row 0: water, water | gap | unchanged, lost
        assert_eq!(*img.get_pixel(0, 0), WATER);
        assert_eq!(*img.get_pixel(1, 0), WATER);
        assert_eq!(*img.get_pixel(2, 0), GAP);
        assert_eq!(*img.get_pixel(6, 0), UNCHANGED);
        assert_eq!(*img.get_pixel(7, 0), LAND_LOST);

        // Row 1: land, land | gap | unchanged, unchanged
        assert_eq!(*img.get_pixel(0, 1), LAND);
        assert_eq!(*img.get_pixel(7, 1), UNCHANGED);
    }

    #[test]
    fn test_scan_results_cannot_be_mapped() {
        let dir = tempdir().unwrap();
        assert!(write_map(&dir.path().join("map.png"), &result(None)).is_err());
    }
}
