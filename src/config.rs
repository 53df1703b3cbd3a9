// src/config.rs

use std::path::PathBuf;

use crate::process::utils::city_label;

/// One input file plus the city label its rows will carry.
#[derive(Debug, Clone)]
pub struct CityFile {
    pub path: PathBuf,
    pub city: String,
}

impl CityFile {
    /// Build a `CityFile` whose label is derived from the file name
    /// (directory components and the final extension stripped).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let city = city_label(&path);
        Self { path, city }
    }
}

/// Ordered inputs and the combined output path for one pipeline run.
///
/// Output row order follows `inputs` order: all of the first city's rows,
/// then the second's, and so on.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub inputs: Vec<CityFile>,
    pub output: PathBuf,
}

impl PipelineConfig {
    pub fn new(inputs: Vec<CityFile>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output: output.into(),
        }
    }
}

impl Default for PipelineConfig {
    /// The reference configuration: four city files under `data/`,
    /// combined output at `data/weather_data.csv`.
    fn default() -> Self {
        let inputs = ["data/CLT.csv", "data/CQT.csv", "data/IND.csv", "data/JAX.csv"]
            .iter()
            .map(|p| CityFile::from_path(*p))
            .collect();
        Self::new(inputs, "data/weather_data.csv")
    }
}
