use crate::rows::RowDetectorParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct CountToolConfig {
    /// Binary plant mask; any nonzero pixel is plant.
    pub mask: PathBuf,
    /// Fitted model JSON written by `train_model`.
    pub model: PathBuf,
    /// Ground resolution in pixels per meter.
    pub scale: f64,
    #[serde(default)]
    pub rows: RowDetectorParams,
    pub output: CountOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CountOutputConfig {
    pub report_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<CountToolConfig, String> {
    super::load_json(path)
}
