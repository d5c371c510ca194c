use std::fs;
use std::io::Write;
use std::path::PathBuf;

use seamap::GridError;
use seamap::area::{Approximation, ApproximationSelector};
use seamap::report::count_islands;
use seamap::simulation::{self, DryMasks, SimulationConfig};
use tempfile::{NamedTempFile, tempdir};

fn grid_file(contents: impl AsRef<[u8]>) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_ref()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn two_by_two_single_rise() {
    let file = grid_file("0 0 -5\n0 1 5\n1 0 15\n1 1 25\n");
    let config = SimulationConfig::new(
        file.path().to_path_buf(),
        1.0,
        1.0,
        10.0,
        ApproximationSelector::First,
    );

    let result = simulation::run(&config).unwrap();
    let scenario = result.variant(Approximation::First).unwrap().scenarios[0];

    assert_eq!(scenario.old_dry_area_km2, 3.0);
    assert_eq!(scenario.new_dry_area_km2, 2.0);
    assert!((scenario.ratio - 0.6667).abs() < 1e-4);

    let masks = result.masks.as_ref().unwrap();
    let after = DryMasks::to_grid(&masks.is_dry_after_rise, &result.shape);
    assert_eq!(after, vec![vec![false, false], vec![true, true]]);
    assert_eq!(count_islands(&after), 1);
}

#[test]
fn uniform_plateau_scan() {
    let mut contents = String::new();
    for lat in 0..5 {
        for lon in 0..4 {
            contents.push_str(&format!("{} {} 100\n", 50.0 + lat as f64 * 0.1, lon as f64 * 0.1));
        }
    }
    let file = grid_file(&contents);
    let config = SimulationConfig::new(
        file.path().to_path_buf(),
        0.0,
        0.0,
        0.0,
        ApproximationSelector::All,
    );

    let result = simulation::run(&config).unwrap();
    assert!(result.masks.is_none());
    assert_eq!(result.shape.rows_per_latitude_band, 4);
    assert_eq!(result.shape.longitude_band_count, 5);

    for variant in &result.variants {
        assert_eq!(variant.scenarios.len(), 50);
        for s in &variant.scenarios {
            if s.sea_level_m < 100.0 {
                assert_eq!(s.ratio, 1.0);
            } else {
                assert_eq!(s.ratio, 0.0);
                assert!(s.old_dry_area_km2 > 0.0);
            }
        }
    }

    let first = &result.variant(Approximation::First).unwrap().scenarios[0];
    let second = &result.variant(Approximation::Second).unwrap().scenarios[0];
    assert!(second.old_dry_area_km2 < first.old_dry_area_km2);
}

#[test]
fn all_water_grid_is_degenerate() {
    let file = grid_file("0 0 -1\n0 1 -2\n1 0 0\n1 1 -3\n");
    let config = SimulationConfig::new(
        file.path().to_path_buf(),
        1.0,
        1.0,
        5.0,
        ApproximationSelector::Second,
    );

    let err = simulation::run(&config).unwrap_err();
    assert!(matches!(
        err,
        GridError::NoDryLand {
            approximation: Approximation::Second,
            ..
        }
    ));
}

#[test]
fn malformed_input_returns_no_results() {
    let file = grid_file("0 0 1\n0 1 1\n1 0 1\n1 1 one\n1 2 1\n");
    let config = SimulationConfig::new(
        file.path().to_path_buf(),
        1.0,
        1.0,
        5.0,
        ApproximationSelector::First,
    );
    assert!(matches!(
        simulation::run(&config),
        Err(GridError::MalformedRecord { line: 4, .. })
    ));
}

#[test]
fn non_utf8_record_is_malformed() {
    let file = grid_file(b"0 0 1\n0 1 1\n1 0 1\n1 1 \xff\n1 2 1\n");
    let config = SimulationConfig::new(
        file.path().to_path_buf(),
        1.0,
        1.0,
        5.0,
        ApproximationSelector::First,
    );
    assert!(matches!(
        simulation::run(&config),
        Err(GridError::MalformedRecord { line: 4, .. })
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let config = SimulationConfig::new(
        dir.path().join("nope.txt"),
        0.0,
        0.0,
        1.0,
        ApproximationSelector::First,
    );
    assert!(matches!(simulation::run(&config), Err(GridError::Io(_))));
}

#[test]
fn bundled_sample_grid() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample.txt");
    assert!(fs::metadata(&path).is_ok());

    let config = SimulationConfig::new(path, 0.0, 0.0, 10.0, ApproximationSelector::All);
    let result = simulation::run(&config).unwrap();

    assert_eq!(result.shape.total_records, 16);
    assert_eq!(result.shape.rows_per_latitude_band, 4);
    assert_eq!(result.shape.longitude_band_count, 4);
    assert_eq!(result.irregular_band_breaks, 0);

    let masks = result.masks.as_ref().unwrap();
    assert_eq!(masks.was_dry_before.iter().filter(|&&d| d).count(), 9);
    assert_eq!(masks.is_dry_after_rise.iter().filter(|&&d| d).count(), 5);

    let first = result.variant(Approximation::First).unwrap().scenarios[0];
    assert!((first.ratio - 5.0 / 9.0).abs() < 1e-12);
}
