use serde::Serialize;

use crate::config::earth::{
    DEGREES_CIRCUMFERENCE, EARTH_CIRCUMFERENCE_HORIZONTAL_KM, EARTH_CIRCUMFERENCE_VERTICAL_KM,
};
use crate::error::{GridError, Result};
use crate::grid::GridShape;

/// Physical size of one grid cell
///
/// Derived values use arc length on a sphere:
/// - horizontal = C_eq / 360 * cos(first_lat) * |Δlon| / longitude_band_count
/// - vertical = C_pole / 360 * |Δlat| / rows_per_latitude_band
///
/// This is fine for country-sized grids, not for continental extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    pub horizontal_km: f64,
    pub vertical_km: f64,
}

impl Spacing {
    pub fn new(horizontal_km: f64, vertical_km: f64) -> Self {
        Self {
            horizontal_km,
            vertical_km,
        }
    }

    /// Resolve cell spacing, deriving any dimension given as zero.
    ///
    /// Non-zero overrides are used verbatim.
    pub fn resolve(shape: &GridShape, horizontal_km: f64, vertical_km: f64) -> Result<Self> {
        let first = &shape.first_record;
        let last = &shape.last_record;

        let horizontal_km = if horizontal_km == 0.0 {
            EARTH_CIRCUMFERENCE_HORIZONTAL_KM / DEGREES_CIRCUMFERENCE
                * first.latitude.to_radians().cos()
                * (last.longitude - first.longitude).abs()
                / shape.longitude_band_count as f64
        } else {
            horizontal_km
        };

        let vertical_km = if vertical_km == 0.0 {
            EARTH_CIRCUMFERENCE_VERTICAL_KM / DEGREES_CIRCUMFERENCE
                * (last.latitude - first.latitude).abs()
                / shape.rows_per_latitude_band as f64
        } else {
            vertical_km
        };

        let spacing = Self::new(horizontal_km, vertical_km);
        if !spacing.is_usable() {
            return Err(GridError::DegenerateSpacing {
                horizontal_km,
                vertical_km,
            });
        }
        Ok(spacing)
    }

    fn is_usable(&self) -> bool {
        self.horizontal_km.is_finite()
            && self.vertical_km.is_finite()
            && self.horizontal_km != 0.0
            && self.vertical_km != 0.0
    }
}
