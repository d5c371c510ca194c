use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::area::ApproximationSelector;

pub mod prompt;

/// Sphere-approximation constants for converting degrees to km.
///
/// Pole-to-pole and equatorial circumferences differ by ~68 km; using the
/// matching one per axis is the only ellipsoid correction applied.
pub mod earth {
    pub const EARTH_CIRCUMFERENCE_VERTICAL_KM: f64 = 40_007.0;
    pub const EARTH_CIRCUMFERENCE_HORIZONTAL_KM: f64 = 40_075.0;
    pub const DEGREES_CIRCUMFERENCE: f64 = 360.0;
}

/// Sea level scan used when no single rise is requested
pub mod scan {
    pub const MIN_RISE_M: f64 = 1.0;
    pub const MAX_RISE_M: f64 = 800.0;
    pub const STEPS: usize = 50;
}

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DATA_FILE_EXTENSION: &str = "txt";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Settings read from `seamap.toml`
///
/// Every field is optional; zero spacing or rise means "derive" / "scan",
/// matching the CLI flags.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub horizontal_spacing: Option<f64>,
    #[serde(default)]
    pub vertical_spacing: Option<f64>,
    #[serde(default)]
    pub rise: Option<f64>,
    #[serde(default)]
    pub approximation: Option<ApproximationSelector>,
    #[serde(default)]
    pub map: Option<PathBuf>,
    #[serde(default)]
    pub curve: Option<PathBuf>,
}

impl FileConfig {
    /// Search the standard locations and return the first config that parses.
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", path.display());
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("seamap.toml"));
    paths.push(PathBuf::from(".seamap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("seamap").join("config.toml"));
        paths.push(config_dir.join("seamap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".seamap.toml"));
    }

    paths
}

/// Resolve an input path: absolute paths and paths that exist as given are
/// kept, anything else is looked up in the data directory.
pub fn resolve_input(input: &Path, data_dir: &Path) -> PathBuf {
    if input.is_absolute() || input.exists() {
        input.to_path_buf()
    } else {
        data_dir.join(input)
    }
}

/// Grid files available in the data directory, sorted by name
pub fn available_inputs(data_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(data_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(DATA_FILE_EXTENSION))
        })
        .collect();
    files.sort();
    Ok(files)
}
